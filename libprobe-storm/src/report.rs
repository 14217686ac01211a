use crate::ledger::Ledger;

/// Render one report line per domain, in snapshot (lexicographic) order.
pub fn render(snapshot: &[(String, u8)]) -> Vec<String> {
    snapshot
        .iter()
        .map(|(domain, pct)| format!("{domain} has {pct}% availability percentage"))
        .collect()
}

/// Print the current availability report to stdout.
pub fn print(ledger: &Ledger) {
    for line in render(&ledger.snapshot()) {
        println!("{line}");
    }
}
