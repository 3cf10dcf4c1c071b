use crate::Input;
use anyhow::Result;
use form_validator::LogLevel;

pub fn execute(input: &Input, verbosity: LogLevel) -> Result<()> {
    let (_, form) = super::build(input, verbosity)?;
    println!("{}", serde_json::to_string_pretty(&form.settings())?);
    Ok(())
}
