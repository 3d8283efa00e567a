use colored::Colorize;
use notes_client::ClientError;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn from_client_error(err: &ClientError) -> UxError {
    let base = UxError::new(err.user_message());
    match err {
        ClientError::Conflict { message } => base
            .why(message.clone())
            .fix("Pick a title no other note uses")
            .suggest("notes list"),
        ClientError::NotFound { message } => base
            .why(message.clone())
            .fix("Titles are matched exactly, including case")
            .suggest("notes search <fragment>"),
        ClientError::Validation { message, details } => {
            let mut ux = base
                .why(message.clone())
                .fix("Titles take 1-80 characters and content 1-480");
            if let Some(details) = details {
                ux = ux.fix(format!("Field errors: {details}"));
            }
            ux
        }
        ClientError::Server { status } => base
            .why(format!("The server answered with HTTP {status}"))
            .fix("Check the server logs"),
        ClientError::Http(e) => base
            .why(e.to_string())
            .fix("Start the notes server")
            .fix("Check --server or NOTES_SERVER_URL")
            .suggest("notes --server http://localhost:3000 list"),
        ClientError::InvalidBaseUrl(url) => base
            .why(format!("'{url}' is not an http(s) URL"))
            .fix("Pass a full URL such as http://localhost:3000")
    }
}
