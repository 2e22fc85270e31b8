use crate::context::ExecutionContext;
use anyhow::{bail, Context, Result};
use nimbus_client::auth;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

pub fn login(ctx: &ExecutionContext, email: &str) -> Result<()> {
    let (label, _) = ctx.current_target()?;
    let password = prompt_password()?;

    let body = serde_json::json!({"email": email, "password": password});
    let response = ctx.anonymous_client()?.post_json("/users/login", &body)?;

    let token = response
        .get("token")
        .and_then(|t| t.as_str())
        .context("login response did not include a token")?;
    auth::save_token(ctx.data_dir(), &label, token)?;

    println!("{}", format!("Logged in as {} on \"{}\".", email, label).green());
    Ok(())
}

pub fn logout(ctx: &ExecutionContext) -> Result<()> {
    let (label, _) = ctx.current_target()?;
    if auth::remove_token(ctx.data_dir(), &label)? {
        println!("Logged out of \"{}\".", label);
    } else {
        println!("No stored credentials for \"{}\".", label);
    }
    Ok(())
}

// The password never echoes through clap; it is read from the terminal (or
// a pipe) after an explicit prompt on stderr.
fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;

    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password.to_string())
}
