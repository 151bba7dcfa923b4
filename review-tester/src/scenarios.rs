use review_panel::{PanelEvent, TransitionTrace};

/// Name of the scenario that checks the reference verdict table instead of a trace.
pub const TRUTH_TABLE: &str = "truth-table";

pub enum Scenario {
    TruthTable,
    Trace(TransitionTrace),
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        (TRUTH_TABLE, "Reference verdict for every state machine edge"),
        ("smoke", "Open, hold, and close a single review"),
        ("switch-keys", "Move between reviews while the overlay stays open"),
        ("reopen", "Close and reopen on the same review"),
        ("null-key", "Open without a review key before and after a real one"),
        ("numeric-keys", "Numeric review ids, including one that shadows a text id"),
        ("resume", "Start with a review already cached by an earlier panel"),
        ("idle-closed", "Repeated close events with nothing cached"),
    ]
}

/// Expand `all` into every catalogued scenario, keeping explicit names in order.
pub fn expand_scenarios(tokens: &[String]) -> Vec<String> {
    let mut names: Vec<String> = tokens.iter().filter(|t| *t != "all").cloned().collect();
    if tokens.iter().any(|t| t == "all") {
        for (name, _) in list_scenarios() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

pub fn get_scenario(name: &str) -> Option<Scenario> {
    let trace = match name {
        TRUTH_TABLE => return Some(Scenario::TruthTable),
        "smoke" => TransitionTrace::new(
            name,
            "Open, hold, and close a single review",
            vec![
                PanelEvent::open("A"),
                PanelEvent::open("A"),
                PanelEvent::close(),
            ],
        ),
        "switch-keys" => TransitionTrace::new(
            name,
            "Move between reviews while the overlay stays open",
            vec![
                PanelEvent::open("A"),
                PanelEvent::open("B"),
                PanelEvent::open("C"),
                PanelEvent::open("A"),
                PanelEvent::close(),
            ],
        ),
        "reopen" => TransitionTrace::new(
            name,
            "Close and reopen on the same review",
            vec![
                PanelEvent::open("A"),
                PanelEvent::close(),
                PanelEvent::open("A"),
                PanelEvent::open("A"),
            ],
        ),
        "null-key" => TransitionTrace::new(
            name,
            "Open without a review key before and after a real one",
            vec![
                PanelEvent::open_empty(),
                PanelEvent::open("A"),
                PanelEvent::open_empty(),
                PanelEvent::close(),
            ],
        ),
        "numeric-keys" => TransitionTrace::new(
            name,
            "Numeric review ids, including one that shadows a text id",
            vec![
                PanelEvent::open(7_i64),
                PanelEvent::open("7"),
                PanelEvent::open(7_i64),
                PanelEvent::close(),
            ],
        ),
        "resume" => TransitionTrace::new(
            name,
            "Start with a review already cached by an earlier panel",
            vec![PanelEvent::open("A"), PanelEvent::open("B"), PanelEvent::close()],
        )
        .starting_from("A"),
        "idle-closed" => TransitionTrace::new(
            name,
            "Repeated close events with nothing cached",
            vec![PanelEvent::close(), PanelEvent::close()],
        ),
        _ => return None,
    };
    Some(Scenario::Trace(trace))
}
