use pomocute_core::error::Result;

pub fn run() -> Result<()> {
    let engine = super::open_one_shot()?;
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
