use std::path::Path;

use strongkids_core::challenge::reached_milestones;
use strongkids_core::MILESTONES;

use super::{load_config, open_database, open_session, print_json, CliResult};

pub fn run(dir: &Path, json: bool) -> CliResult {
    let config = load_config(dir)?;
    let db = open_database(dir)?;
    let session = open_session(&db, &config);
    let day = session.state().day;

    if json {
        return print_json(&MILESTONES);
    }

    let next = session.state().next_milestone();
    let reached: Vec<_> = reached_milestones(day).collect();
    for m in &MILESTONES {
        let marker = if reached.contains(&m) {
            "reached"
        } else if m == next {
            "next"
        } else {
            ""
        };
        let label = if config.display.badges {
            m.decorated()
        } else {
            m.reward.to_string()
        };
        println!("Day {:>2}  {:<24} {}", m.day, label, marker);
    }
    Ok(())
}
