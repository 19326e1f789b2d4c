//! Implementation of the `formlock status` command.
//!
//! Prints one line per row of a model listing: who, if anyone, is editing it.
//! With `--watch` the listing is refreshed every `ping_seconds`; with `--take`
//! a row locked by someone else is marked for takeover by the next `hold`.

use super::{http_transport, model_key, open_cookie_jar};
use crate::cli::StatusArgs;
use chrono::Local;
use formlock::config::Config;
use formlock::error::Result;
use formlock::indicator::{ListIndicator, RowAnnotation, RowStatus};
use std::thread;

pub fn cmd_status(config: &Config, args: StatusArgs) -> Result<()> {
    let model = model_key(&args.model);
    let indicator = ListIndicator::new(
        &model,
        &config.endpoint(),
        http_transport(config)?,
        config.current_user.clone(),
        config.messages.clone(),
    );

    if args.watch {
        eprintln!("formlock status started");
        eprintln!("  model:    {}", model);
        eprintln!("  endpoint: {}", indicator.endpoint());
        eprintln!("  interval: {}s", config.ping_seconds);
        eprintln!();
    }

    let mut take = args.take.clone();
    loop {
        let records = indicator.refresh()?;
        let rows = if args.ids.is_empty() {
            let ids: Vec<&str> = records.iter().map(|r| r.object_id.as_str()).collect();
            indicator.annotate(&records, ids)
        } else {
            indicator.annotate(&records, &args.ids)
        };

        if args.watch {
            println!("[{}]", Local::now().format("%H:%M:%S"));
        }
        print_rows(&rows);

        if let Some(id) = take.take() {
            match indicator.status_of(&records, &id) {
                RowStatus::LockedByOther { holder, .. } => {
                    let mut jar = open_cookie_jar(config)?;
                    indicator.take_over(&mut jar)?;
                    println!(
                        "Takeover recorded: `formlock hold {} {} {}` will take the lock from {}.",
                        args.model.app, args.model.model, id, holder
                    );
                }
                RowStatus::LockedByMe { .. } => {
                    println!("Row {} is already locked by you; nothing to take over.", id)
                }
                RowStatus::Unlocked => println!("Row {} is not locked; nothing to take over.", id),
            }
        }

        if !args.watch {
            break;
        }
        thread::sleep(config.ping_interval());
    }

    Ok(())
}

fn print_rows(rows: &[RowAnnotation]) {
    if rows.is_empty() {
        println!("No locked rows.");
        return;
    }
    for row in rows {
        let class = match row.status.css_class() {
            "" => "-",
            class => class,
        };
        println!(
            "{:>10}  {:<8}  {}",
            row.object_id,
            class,
            row.status.title().unwrap_or("")
        );
    }
}
