// ==========================================
// footy-stats - CSV templates
// ==========================================
// One static template per importable kind, defining the column
// contract that kind's CSV upload expects. Served read-only.
// ==========================================

use crate::domain::import::ImportKind;

pub fn header_template(kind: ImportKind) -> &'static str {
    match kind {
        ImportKind::Team => include_str!("../assets/templates/teams.csv"),
        ImportKind::Player => include_str!("../assets/templates/players.csv"),
        ImportKind::Match => include_str!("../assets/templates/matches.csv"),
        ImportKind::PlayerStat => include_str!("../assets/templates/player_stats.csv"),
    }
}
