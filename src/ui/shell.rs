use anyhow::Result;

use crate::{
    domain::{outcome::Failure, session::Credentials},
    infra::config::DisplayConfig,
    remote::RemoteChannel,
    usecases::coordinator::{
        Coordinator, GuardedAction, RegistrationChange, RegistrationInput, ResetChange,
        ResetInput, SignInChange, SignInInput,
    },
};

use super::{
    menu::{render_menu, MenuChoice},
    message_rendering::render_posts,
    terminal::ChatTerminal,
};

const GOODBYE: &str = "Thanks for chatting, goodbye...";
const INVALID_OPTION: &str = "Invalid option. Please choose from the menu.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// Reads menu choices until the user quits or input ends. Action failures
/// are printed and the loop goes on; only terminal I/O errors end it early.
pub fn start<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
    display: &DisplayConfig,
) -> Result<()> {
    let (timezone, clear_screen) = (display.timezone, display.clear_screen);
    tracing::info!(?timezone, clear_screen, "starting menu shell");

    loop {
        if display.clear_screen {
            terminal.clear_screen()?;
        }
        terminal.print_line(&render_menu(
            coordinator.session(),
            coordinator.default_post_count(),
        ))?;

        let Some(input) = terminal.prompt_line("> ")? else {
            break;
        };

        let step = match MenuChoice::parse(&input) {
            Some(MenuChoice::Quit) => Step::Exit,
            Some(choice) => dispatch(terminal, coordinator, display, choice)?,
            None => {
                terminal.print_line(INVALID_OPTION)?;
                Step::Continue
            }
        };

        if step == Step::Exit {
            break;
        }

        if display.clear_screen && terminal.prompt_line("Press enter to continue...")?.is_none() {
            break;
        }
    }

    terminal.print_line(GOODBYE)?;
    Ok(())
}

fn dispatch<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
    display: &DisplayConfig,
    choice: MenuChoice,
) -> Result<Step> {
    tracing::debug!(?choice, "menu choice");

    match choice {
        MenuChoice::ListPosts => {
            match coordinator.list_posts(0) {
                Ok(posts) => terminal.print_line(&render_posts(&posts, display.timezone))?,
                Err(failure) => report(terminal, &failure)?,
            }
            Ok(Step::Continue)
        }
        MenuChoice::ToggleSignIn => toggle_sign_in(terminal, coordinator),
        MenuChoice::ToggleRegistration => toggle_registration(terminal, coordinator),
        MenuChoice::ToggleResetPassword => toggle_reset_password(terminal, coordinator),
        MenuChoice::PostMessage => post_message(terminal, coordinator, display),
        MenuChoice::DeleteAccount => delete_account(terminal, coordinator),
        MenuChoice::DeletePost => delete_post(terminal, coordinator),
        MenuChoice::Quit => Ok(Step::Exit),
    }
}

fn toggle_sign_in<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
) -> Result<Step> {
    let input = if coordinator.session().is_signed_in() {
        SignInInput::SignOut
    } else {
        let Some(username) = terminal.prompt_line("Username: ")? else {
            return Ok(Step::Exit);
        };
        let Some(password) = terminal.prompt_secret("Password: ")? else {
            return Ok(Step::Exit);
        };
        SignInInput::SignIn(Credentials::new(username, password))
    };

    match coordinator.toggle_sign_in(input) {
        Ok(SignInChange::SignedIn { user }) => {
            terminal.print_line(&format!("User {user} signed in."))?
        }
        Ok(SignInChange::SignedOut { .. }) => terminal.print_line("You are logged out.")?,
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn toggle_registration<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
) -> Result<Step> {
    let input = if coordinator.session().is_registering() {
        let Some(username) = terminal.prompt_line("Username: ")? else {
            return Ok(Step::Exit);
        };
        let Some(confirmation_code) = terminal.prompt_line("Verification code: ")? else {
            return Ok(Step::Exit);
        };
        RegistrationInput::Confirm {
            username,
            confirmation_code,
        }
    } else {
        let Some(username) = terminal.prompt_line("Username: ")? else {
            return Ok(Step::Exit);
        };
        let Some(password) = terminal.prompt_secret("Password: ")? else {
            return Ok(Step::Exit);
        };
        let Some(email) = terminal.prompt_line("Email: ")? else {
            return Ok(Step::Exit);
        };
        RegistrationInput::Start {
            credentials: Credentials::new(username, password),
            email,
        }
    };

    match coordinator.toggle_registration(input) {
        Ok(RegistrationChange::Started { user }) => {
            terminal.print_line(&format!("User {user} registration started."))?;
            terminal
                .print_line("Please check email for verification code to continue registration.")?;
        }
        Ok(RegistrationChange::Confirmed { user }) => {
            terminal.print_line(&format!("User {user} verification successful."))?
        }
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn toggle_reset_password<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
) -> Result<Step> {
    if let Err(failure) = coordinator.require_signed_in(GuardedAction::ResetPassword) {
        report(terminal, &failure)?;
        return Ok(Step::Continue);
    }

    let input = if coordinator.session().is_resetting_password() {
        let Some(confirmation_code) = terminal.prompt_line("Verification code: ")? else {
            return Ok(Step::Exit);
        };
        let Some(new_password) = terminal.prompt_secret("New password: ")? else {
            return Ok(Step::Exit);
        };
        ResetInput::Confirm {
            confirmation_code,
            new_password,
        }
    } else {
        ResetInput::Start
    };

    match coordinator.toggle_reset_password(input) {
        Ok(ResetChange::Started { .. }) => terminal.print_line(
            "Please check your email for verification code to continue with password change.",
        )?,
        Ok(ResetChange::Completed { .. }) => {
            terminal.print_line("You've successfully reset your password.")?
        }
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn post_message<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
    display: &DisplayConfig,
) -> Result<Step> {
    if let Err(failure) = coordinator.require_signed_in(GuardedAction::PostMessage) {
        report(terminal, &failure)?;
        return Ok(Step::Continue);
    }

    let Some(text) = terminal.prompt_line("Message: ")? else {
        return Ok(Step::Exit);
    };

    match coordinator.post_message(&text) {
        Ok(posted) => {
            terminal.print_line("Your message has been posted.")?;
            match posted.posts {
                Ok(posts) => terminal.print_line(&render_posts(&posts, display.timezone))?,
                Err(failure) => report(terminal, &failure)?,
            }
        }
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn delete_account<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
) -> Result<Step> {
    let user = match coordinator.require_signed_in(GuardedAction::DeleteAccount) {
        Ok(user) => user.to_owned(),
        Err(failure) => {
            report(terminal, &failure)?;
            return Ok(Step::Continue);
        }
    };

    if terminal
        .prompt_line(&format!("Press enter to confirm deleting account {user}"))?
        .is_none()
    {
        return Ok(Step::Exit);
    }

    match coordinator.delete_account() {
        Ok(user) => terminal.print_line(&format!("Account {user} deleted."))?,
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn delete_post<C: RemoteChannel>(
    terminal: &mut dyn ChatTerminal,
    coordinator: &mut Coordinator<C>,
) -> Result<Step> {
    if let Err(failure) = coordinator.require_signed_in(GuardedAction::DeletePost) {
        report(terminal, &failure)?;
        return Ok(Step::Continue);
    }

    let Some(post_id) = terminal.prompt_line("Post ID (timestamp) to delete: ")? else {
        return Ok(Step::Exit);
    };

    match coordinator.delete_post(&post_id) {
        Ok(()) => terminal.print_line(&format!("Post {} deleted.", post_id.trim()))?,
        Err(failure) => report(terminal, &failure)?,
    }
    Ok(Step::Continue)
}

fn report(terminal: &mut dyn ChatTerminal, failure: &Failure) -> std::io::Result<()> {
    tracing::warn!(code = failure.kind().as_label(), error = %failure, "action failed");
    terminal.print_line(failure.human_message())
}
