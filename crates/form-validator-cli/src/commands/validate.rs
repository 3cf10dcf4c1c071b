use crate::Input;
use anyhow::Result;
use colored::Colorize;
use form_validator::LogLevel;

/// Returns whether the form is valid
pub fn execute(input: &Input, verbosity: LogLevel, all: bool) -> Result<bool> {
    let (document, form) = super::build(input, verbosity)?;

    println!(
        "{} {} field{}",
        "Validating".green().bold(),
        form.len(),
        if form.len() == 1 { "" } else { "s" }
    );
    println!();

    let valid = if all {
        form.validate_all().is_empty()
    } else {
        form.validate()
    };

    if valid {
        println!("{}", "✓ Form is valid".green().bold());
        return Ok(true);
    }

    for entry in document.messages() {
        let label = if entry.id.is_empty() {
            entry.name.clone()
        } else {
            format!("{}#{}", entry.name, entry.id)
        };
        println!("{} {}: {}", "✗".red().bold(), label.cyan(), entry.message);
    }
    println!();
    println!("{}", "Form is invalid".red().bold());

    Ok(false)
}
