use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::SystemTime;

mod cli_style;

use billboard_server::user::{SqliteUserStore, UserManager, UserRole};
use cli_style::{
    get_prompt, get_styles, print_command_echo, print_empty_list, print_error, print_goodbye,
    print_help, print_key_value, print_list_item, print_section_footer, print_section_header,
    print_success, print_welcome, CommandHelp, TableBuilder,
};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles=get_styles())]
struct CliArgs {
    /// Path to user.db. Looked up from the current directory upwards when
    /// omitted.
    #[clap(value_parser = parse_path)]
    pub path: Option<PathBuf>,
}

#[derive(Parser)]
#[command(styles=get_styles(), name = "", disable_help_subcommand = true)]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Creates a user with the given handle.
    AddUser { user_handle: String },

    /// Creates a password login for the given user.
    /// Fails if the user already has a password set.
    AddLogin {
        user_handle: String,
        password: String,
    },

    /// Change the password of a user, fails if no password was set.
    UpdateLogin {
        user_handle: String,
        password: String,
    },

    /// Deletes the password login of a given user.
    DeleteLogin { user_handle: String },

    /// Shows credentials, tokens and role of a given user.
    Show { user_handle: String },

    /// Verifies the password of a given user without logging in.
    CheckPassword {
        user_handle: String,
        password: String,
    },

    /// Shows all users with their role.
    UserHandles,

    /// Shows all roles and their permissions.
    ListRoles,

    /// Sets the role of a user: viewer, manager or admin.
    SetRole { user_handle: String, role: String },

    /// Shows the path of the current user db.
    Where,

    /// Shows this help.
    Help,

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn format_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

fn format_optional_time(time: Option<SystemTime>) -> String {
    time.map(format_time).unwrap_or_else(|| "never".to_string())
}

fn command_help() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "add-user",
            args: "<handle>",
            description: "Create a user",
        },
        CommandHelp {
            name: "user-handles",
            args: "",
            description: "List users with their role",
        },
        CommandHelp {
            name: "show",
            args: "<handle>",
            description: "Show credentials, tokens and role",
        },
        CommandHelp {
            name: "add-login",
            args: "<handle> <password>",
            description: "Add a password login",
        },
        CommandHelp {
            name: "update-login",
            args: "<handle> <password>",
            description: "Change the password",
        },
        CommandHelp {
            name: "delete-login",
            args: "<handle>",
            description: "Remove the password login",
        },
        CommandHelp {
            name: "check-password",
            args: "<handle> <password>",
            description: "Verify a password",
        },
        CommandHelp {
            name: "list-roles",
            args: "",
            description: "Roles and their permissions",
        },
        CommandHelp {
            name: "set-role",
            args: "<handle> <role>",
            description: "Set the role of a user",
        },
        CommandHelp {
            name: "where",
            args: "",
            description: "Path of the user db",
        },
        CommandHelp {
            name: "exit",
            args: "",
            description: "Quit",
        },
        CommandHelp {
            name: "help",
            args: "",
            description: "Show this list",
        },
    ]
}

fn show_user(user_manager: &UserManager, user_handle: &str) -> Result<()> {
    let credentials = user_manager
        .get_user_credentials(user_handle)?
        .ok_or_else(|| anyhow!("User {} not found.", user_handle))?;

    print_section_header(user_handle);
    print_key_value("User id", &credentials.user_id.to_string());
    print_key_value(
        "Role",
        user_manager.get_user_role(credentials.user_id)?.as_str(),
    );
    match &credentials.username_password {
        Some(password) => {
            print_key_value("Password set", &format_time(password.created));
            print_key_value("Last login", &format_optional_time(password.last_used));
        }
        None => print_key_value("Password", "none"),
    }

    println!();
    let tokens = user_manager.get_user_tokens(user_handle)?;
    if tokens.is_empty() {
        print_empty_list("No auth tokens");
    } else {
        let mut table = TableBuilder::new(&["Token", "Created", "Last used"]);
        for token in tokens {
            table.add_row(vec![
                format!("{}...", &token.value.0[..token.value.0.len().min(8)]),
                format_time(token.created),
                format_optional_time(token.last_used),
            ]);
        }
        table.print();
    }

    println!();
    print_key_value("Permissions", "");
    for permission in user_manager.get_user_permissions(credentials.user_id)? {
        print_list_item(&format!("{:?}", permission));
    }
    print_section_footer();
    Ok(())
}

fn execute_command(
    line: String,
    user_manager: &UserManager,
    db_path: &str,
) -> CommandExecutionResult {
    if line.is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = InnerCli::try_parse_from(std::iter::once(" ").chain(args.iter().map(String::as_str)));

    let command = match cli {
        Ok(cli) => cli.command,
        Err(e) => {
            if e.print().is_err() {
                println!("{}", e);
            }
            return CommandExecutionResult::Ok;
        }
    };

    print_command_echo(&line);
    let outcome: Result<()> = match command {
        InnerCommand::AddUser { user_handle } => user_manager
            .add_user(&user_handle)
            .map(|id| print_success(&format!("Created {} with id {}", user_handle, id))),
        InnerCommand::AddLogin {
            user_handle,
            password,
        } => user_manager
            .create_password_credentials(&user_handle, password)
            .map(|_| print_success(&format!("Password set for {}", user_handle))),
        InnerCommand::UpdateLogin {
            user_handle,
            password,
        } => user_manager
            .update_password_credentials(&user_handle, password)
            .map(|_| print_success(&format!("Password updated for {}", user_handle))),
        InnerCommand::DeleteLogin { user_handle } => user_manager
            .delete_password_credentials(&user_handle)
            .map(|_| print_success(&format!("Password removed for {}", user_handle))),
        InnerCommand::Show { user_handle } => show_user(user_manager, &user_handle),
        InnerCommand::CheckPassword {
            user_handle,
            password,
        } => user_manager
            .authenticate(&user_handle, &password)
            .map(|result| match result {
                Some(_) => print_success("The password provided is correct!"),
                None => print_error("Wrong password, or the user has no password."),
            }),
        InnerCommand::UserHandles => user_manager.list_users().map(|users| {
            if users.is_empty() {
                print_empty_list("No users");
                return;
            }
            let mut table = TableBuilder::new(&["Handle", "Role", "Password"]);
            for user in users {
                table.add_row(vec![
                    user.handle,
                    user.role.as_str().to_string(),
                    if user.has_password { "yes" } else { "no" }.to_string(),
                ]);
            }
            table.print();
        }),
        InnerCommand::ListRoles => {
            for role in UserRole::ALL {
                print_section_header(&format!("{} (level {})", role.as_str(), role.level()));
                for permission in role.permissions() {
                    print_list_item(&format!("{:?}", permission));
                }
                print_section_footer();
            }
            Ok(())
        }
        InnerCommand::SetRole { user_handle, role } => match UserRole::from_str(&role) {
            Some(role) => user_manager
                .set_user_role(&user_handle, role)
                .map(|_| print_success(&format!("{} is now {}", user_handle, role.as_str()))),
            None => Err(anyhow!(
                "Invalid role '{}'. Valid roles are: viewer, manager, admin",
                role
            )),
        },
        InnerCommand::Where => {
            print_key_value("Database", db_path);
            Ok(())
        }
        InnerCommand::Help => {
            print_help(&command_help());
            Ok(())
        }
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    };

    match outcome {
        Ok(()) => CommandExecutionResult::Ok,
        Err(err) => CommandExecutionResult::Error(err.to_string()),
    }
}

#[derive(rustyline_derive::Hinter)]
struct CommandHelper {
    commands_names: Vec<String>,
}

impl CommandHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        CommandHelper { commands_names }
    }
}

impl Completer for CommandHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}
impl Helper for CommandHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let user_db_path = match cli_args.path {
        Some(path) => path,
        None => SqliteUserStore::infer_path().with_context(|| {
            "Could not infer the user DB file path, please specify it explicitly."
        })?,
    };
    let user_store = SqliteUserStore::new(&user_db_path)?;
    let user_manager = UserManager::new(Box::new(user_store));
    let db_path = user_db_path.display().to_string();

    print_welcome(&db_path);

    let config = Config::builder()
        .completion_type(CompletionType::List)
        .build();

    let mut rl = Editor::<CommandHelper, FileHistory>::with_config(config)?;
    rl.set_helper(Some(CommandHelper::new()));

    loop {
        match rl.readline(&get_prompt()) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &user_manager, &db_path) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    print_goodbye();
    Ok(())
}
