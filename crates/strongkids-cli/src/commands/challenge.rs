use std::path::Path;

use chrono::Utc;
use strongkids_core::{Category, Event, TaskKey};

use super::{load_config, open_database, open_session, print_json, CliResult};
use crate::{confirm, render};

pub fn status(dir: &Path, expand: Option<Category>, json: bool) -> CliResult {
    let config = load_config(dir)?;
    let db = open_database(dir)?;
    let session = open_session(&db, &config);

    if json {
        #[derive(serde::Serialize)]
        struct Status<'a> {
            snapshot: Event,
            tasks: &'a strongkids_core::TaskBoard,
        }
        print_json(&Status {
            snapshot: session.snapshot(),
            tasks: &session.state().tasks,
        })
    } else {
        print!(
            "{}",
            render::status(
                session.state(),
                session.engine().pending_until(),
                expand,
                &config
            )
        );
        Ok(())
    }
}

pub fn toggle(dir: &Path, category: &str, item: &str, json: bool) -> CliResult {
    let key = TaskKey::parse(category, item)?;
    let config = load_config(dir)?;
    let db = open_database(dir)?;
    let mut session = open_session(&db, &config);

    match session.toggle(key) {
        Some(event) if json => print_json(&event)?,
        Some(event) => println!("{}", render::event(&event, &config)),
        None => {
            eprintln!("Today's checklist is done. Tasks unlock when the next day starts.");
        }
    }
    Ok(())
}

pub fn complete(dir: &Path, no_wait: bool, json: bool) -> CliResult {
    let config = load_config(dir)?;
    let db = open_database(dir)?;
    let mut session = open_session(&db, &config);

    let emit = |event: &Event| -> CliResult {
        if json {
            print_json(event)
        } else {
            println!("{}", render::event(event, &config));
            Ok(())
        }
    };

    let Some(event) = session.complete_day() else {
        if let Some(until) = session.engine().pending_until() {
            eprintln!(
                "Day {} is already complete; the next day starts at {until}.",
                session.state().day
            );
        }
        return Ok(());
    };
    emit(&event)?;

    if let Event::DayCompleted { advance_at, .. } = event {
        if no_wait {
            return Ok(());
        }
        let wait = (advance_at - Utc::now()).to_std().unwrap_or_default();
        std::thread::sleep(wait);
        if let Some(advanced) = session.tick().or_else(|| session.finish_pending()) {
            emit(&advanced)?;
        }
    }
    Ok(())
}

pub fn reset(dir: &Path, yes: bool) -> CliResult {
    if !yes {
        let confirmed = confirm::confirm(
            "Are you sure you want to reset all progress? This cannot be undone.",
            &mut std::io::stdin().lock(),
            &mut std::io::stderr(),
        )?;
        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    let config = load_config(dir)?;
    let db = open_database(dir)?;
    let mut session = open_session(&db, &config);
    if let Some(event) = session.reset_progress() {
        println!("{}", render::event(&event, &config));
    }
    Ok(())
}
