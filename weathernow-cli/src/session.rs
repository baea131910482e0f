//! Interactive lookup session: the terminal counterpart of a search form with
//! a "use my location" button and a unit selector.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use std::fmt;
use weathernow_core::{LocationProvider, LookupController, UnitSystem, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    UseLocation,
    SwitchUnits,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [Action::Search, Action::UseLocation, Action::SwitchUnits, Action::Quit];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search city",
            Action::UseLocation => "Use my location",
            Action::SwitchUnits => "Switch units",
            Action::Quit => "Quit",
        })
    }
}

fn unit_label(units: UnitSystem) -> &'static str {
    match units {
        UnitSystem::Metric => "°C (metric)",
        UnitSystem::Imperial => "°F (imperial)",
    }
}

pub async fn run(mut controller: LookupController, locator: &dyn LocationProvider) -> Result<()> {
    loop {
        let prompt = format!("Weather Now [{}]", unit_label(controller.units()));

        let action = match Select::new(&prompt, Action::ALL.to_vec()).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Search => {
                let city = match Text::new("City:")
                    .with_placeholder("Enter city (e.g., Mumbai)")
                    .prompt()
                {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(err) => return Err(err.into()),
                };

                // Blank input is a no-op; keep whatever is on screen.
                let Some(pending) = controller.begin_name_lookup(&city) else {
                    continue;
                };
                show(&controller);

                let result = controller.fetch(&pending).await;
                controller.complete(pending.kind, result);
            }
            Action::UseLocation => {
                if locator.is_available() {
                    println!("{}", render::LOADING_TEXT);
                }
                controller.lookup_by_location(locator).await;
            }
            Action::SwitchUnits => {
                let options: Vec<&str> = UnitSystem::ALL.iter().map(|u| unit_label(*u)).collect();
                let current = UnitSystem::ALL
                    .iter()
                    .position(|u| *u == controller.units())
                    .unwrap_or_default();

                match Select::new("Units:", options).with_starting_cursor(current).prompt() {
                    Ok(choice) => {
                        if let Some(units) = UnitSystem::ALL.into_iter().find(|u| unit_label(*u) == choice) {
                            controller.set_units(units);
                        }
                    }
                    Err(InquireError::OperationCanceled) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            Action::Quit => return Ok(()),
        }

        show(&controller);
    }
}

fn show(controller: &LookupController) {
    if let Some(out) = render::render_state(controller.state(), controller.units()) {
        println!("\n{out}\n");
    }
}
