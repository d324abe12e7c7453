use anyhow::Result;
use dialoguer::{Input, Password};
use serde_json::json;

use crate::cli::AuthArgs;
use crate::client::ApiService;
use crate::forms;
use crate::output;
use crate::session::SessionStore;

fn resolve_email(arg: Option<String>) -> Result<String> {
    let raw = match arg {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    Ok(forms::email(&raw)?)
}

pub async fn login(
    api: &dyn ApiService,
    session_store: &mut SessionStore,
    args: AuthArgs,
) -> Result<()> {
    let email = resolve_email(args.email)?;
    let password = forms::password(&Password::new().with_prompt("Password").interact()?)?;

    session_store.login(api, &email, &password).await?;
    output::print_message(&format!("Logged in as {email}"));

    Ok(())
}

pub async fn signup(
    api: &dyn ApiService,
    session_store: &mut SessionStore,
    args: AuthArgs,
) -> Result<()> {
    let email = resolve_email(args.email)?;
    let password = forms::password(
        &Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    )?;

    session_store.signup(api, &email, &password).await?;
    output::print_message(&format!("Account created. Logged in as {email}"));

    Ok(())
}

pub fn logout(session_store: &mut SessionStore) -> Result<()> {
    if !session_store.current().is_authenticated() {
        output::print_message("Not logged in.");
        return Ok(());
    }

    session_store.logout()?;
    output::print_message("Logged out.");

    Ok(())
}

pub fn whoami(session_store: &SessionStore) -> Result<()> {
    let session = session_store.current();

    if output::is_json_output() {
        let value = json!({
            "authenticated": session.is_authenticated(),
            "email": session.user().map(|u| u.email.clone()),
            "token_path": session_store.token_path(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if !session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }

    match session.user() {
        Some(user) => println!("Logged in as {}", user.email),
        None => println!(
            "Logged in (token restored from {})",
            session_store.token_path().display()
        ),
    }

    Ok(())
}
