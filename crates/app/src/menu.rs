//! The interactive main menu.

use services::{
    AccountError, AppServices, AttemptOutcome, Console, ConsoleError, SessionError, UserSession,
    results_report,
};

pub const MAIN_MENU: &str = "\n1. Register\n2. Login\n3. Take Quiz\n4. Show Results\n5. Logout\n6. Exit";
pub const MENU_PROMPT: &str = "Select an option: ";
pub const USERNAME_PROMPT: &str = "Enter your username: ";
pub const PASSWORD_PROMPT: &str = "Enter your password: ";

pub const REGISTERED: &str = "Registration successful!";
pub const DUPLICATE_USERNAME: &str = "username already registered!";
pub const LOGGED_IN: &str = "Login successful!";
pub const BAD_CREDENTIALS: &str = "Invalid username or password.";
pub const LOGIN_REQUIRED: &str = "Please log in first!";
pub const LOGGED_OUT: &str = "Logged out.";
pub const GOODBYE: &str = "Goodbye!";
pub const INVALID_OPTION: &str = "Invalid option. Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Register,
    Login,
    TakeQuiz,
    ShowResults,
    Logout,
    Exit,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Register),
            "2" => Some(Self::Login),
            "3" => Some(Self::TakeQuiz),
            "4" => Some(Self::ShowResults),
            "5" => Some(Self::Logout),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Outcome of one menu action.
enum Step {
    Continue,
    Quit,
}

/// Run the menu until the user exits or input ends.
///
/// Store failures inside an action are shown as a notice and the menu keeps
/// going. Only console I/O failures end the loop with an error.
///
/// # Errors
///
/// Returns the console error if reading input fails for a reason other than
/// end of input.
pub async fn run_menu(services: &AppServices, console: &mut dyn Console) -> anyhow::Result<()> {
    let mut session: Option<UserSession> = None;

    loop {
        console.display(MAIN_MENU);
        let raw = match console.prompt_line(MENU_PROMPT) {
            Ok(raw) => raw,
            Err(ConsoleError::Closed) => break,
            Err(err) => return Err(err.into()),
        };

        let Some(choice) = MenuChoice::parse(&raw) else {
            console.display(INVALID_OPTION);
            continue;
        };

        let step = match choice {
            MenuChoice::Register => register(services, console).await,
            MenuChoice::Login => login(services, console, &mut session).await,
            MenuChoice::TakeQuiz => match &session {
                Some(user) => take_quiz(services, console, user).await,
                None => {
                    console.display(LOGIN_REQUIRED);
                    Ok(Step::Continue)
                }
            },
            MenuChoice::ShowResults => {
                match &session {
                    Some(user) => show_results(services, console, user).await,
                    None => console.display(LOGIN_REQUIRED),
                }
                Ok(Step::Continue)
            }
            MenuChoice::Logout => {
                if session.take().is_some() {
                    console.display(LOGGED_OUT);
                } else {
                    console.display(LOGIN_REQUIRED);
                }
                Ok(Step::Continue)
            }
            MenuChoice::Exit => Ok(Step::Quit),
        };

        match step {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) | Err(ConsoleError::Closed) => break,
            Err(err) => return Err(err.into()),
        }
    }

    console.display(GOODBYE);
    Ok(())
}

fn read_credentials(console: &mut dyn Console) -> Result<(String, String), ConsoleError> {
    let username = console.prompt_line(USERNAME_PROMPT)?;
    let password = console.prompt_line(PASSWORD_PROMPT)?;
    Ok((username, password))
}

async fn register(services: &AppServices, console: &mut dyn Console) -> Result<Step, ConsoleError> {
    let (username, password) = read_credentials(console)?;
    match services.accounts().register(&username, &password).await {
        Ok(_) => console.display(REGISTERED),
        Err(AccountError::DuplicateUsername) => console.display(DUPLICATE_USERNAME),
        Err(err) => store_notice(console, &err),
    }
    Ok(Step::Continue)
}

async fn login(
    services: &AppServices,
    console: &mut dyn Console,
    session: &mut Option<UserSession>,
) -> Result<Step, ConsoleError> {
    let (username, password) = read_credentials(console)?;
    match services.accounts().login(&username, &password).await {
        Ok(user) => {
            *session = Some(user);
            console.display(LOGGED_IN);
        }
        Err(AccountError::InvalidCredentials) => console.display(BAD_CREDENTIALS),
        Err(err) => store_notice(console, &err),
    }
    Ok(Step::Continue)
}

async fn take_quiz(
    services: &AppServices,
    console: &mut dyn Console,
    user: &UserSession,
) -> Result<Step, ConsoleError> {
    match services.sessions().run_attempt(user, console).await {
        Ok(AttemptOutcome::Completed(_) | AttemptOutcome::NoQuestionsAvailable) => {}
        // The attempt already showed its own notice.
        Err(SessionError::InvalidSelection) => {}
        Err(SessionError::Console(err)) => return Err(err),
        Err(err) => store_notice(console, &err),
    }
    Ok(Step::Continue)
}

async fn show_results(services: &AppServices, console: &mut dyn Console, user: &UserSession) {
    match services.results().get_results(user).await {
        Ok(entries) => console.display(&results_report(&entries)),
        Err(err) => store_notice(console, &err),
    }
}

fn store_notice(console: &mut dyn Console, err: &dyn std::error::Error) {
    tracing::error!(error = %err, "menu action failed");
    console.display(&format!("Something went wrong: {err}"));
}
