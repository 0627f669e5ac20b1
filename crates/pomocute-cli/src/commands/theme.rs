use clap::Subcommand;
use pomocute_core::error::Result;

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> Result<()> {
    let theme = match action {
        ThemeAction::Show => super::open_one_shot()?.theme(),
        ThemeAction::Toggle => {
            let mut persistence = super::open_persistence()?;
            let theme = persistence.load_theme().toggled();
            persistence.try_save_theme(theme)?;
            theme
        }
    };
    println!("{theme}");
    Ok(())
}
