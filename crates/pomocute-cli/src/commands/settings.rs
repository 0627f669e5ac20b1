use clap::Subcommand;
use pomocute_core::error::Result;
use pomocute_core::SettingsForm;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the current durations
    Show {
        /// Print the stored JSON blob instead
        #[arg(long)]
        json: bool,
    },
    /// Save new durations, in whole minutes
    Set {
        /// Focus length in minutes
        #[arg(allow_hyphen_values = true)]
        focus_minutes: String,
        /// Break length in minutes
        #[arg(allow_hyphen_values = true)]
        break_minutes: String,
    },
}

pub fn run(action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show { json } => {
            let engine = super::open_one_shot()?;
            let settings = engine.settings();
            if json {
                println!("{}", serde_json::to_string(settings)?);
            } else {
                println!("focus: {} min", settings.focus_minutes());
                println!("break: {} min", settings.break_minutes());
            }
        }
        SettingsAction::Set {
            focus_minutes,
            break_minutes,
        } => {
            let settings = SettingsForm::new(focus_minutes, break_minutes).parse()?;
            super::open_persistence()?.try_save_settings(&settings)?;
            println!("ok");
        }
    }
    Ok(())
}
