use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_width::UnicodeWidthStr;

pub fn get_styles() -> Styles {
    let accent = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
    let ok = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)));
    let bad = Style::new()
        .bold()
        .fg_color(Some(Color::Ansi(AnsiColor::Red)));

    clap::builder::Styles::styled()
        .usage(accent.underline())
        .header(accent.underline())
        .literal(ok)
        .valid(ok)
        .invalid(bad)
        .error(bad)
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

pub mod colors {
    use crossterm::style::Color;

    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 176,
        b: 0,
    };
    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 180,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 80,
        g: 220,
        b: 120,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 240,
        g: 240,
        b: 240,
    };
}

mod glyphs {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

const SECTION_WIDTH: usize = 60;

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        glyphs::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        glyphs::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_len + 2) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_len + 2 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        glyphs::TOP_LEFT.with(colors::TEAL),
        glyphs::HORIZONTAL.repeat(left).with(colors::TEAL),
        title.with(colors::AMBER).bold(),
        glyphs::HORIZONTAL.repeat(right).with(colors::TEAL),
        glyphs::TOP_RIGHT.with(colors::TEAL),
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        glyphs::BOTTOM_LEFT.with(colors::TEAL),
        glyphs::HORIZONTAL.repeat(SECTION_WIDTH).with(colors::TEAL),
        glyphs::BOTTOM_RIGHT.with(colors::TEAL),
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        glyphs::BULLET.with(colors::TEAL),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_list_item(item: &str) {
    println!(
        "  {} {}",
        glyphs::BULLET.with(colors::AMBER),
        item.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        glyphs::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

/// Fixed-column table sized to its widest cell.
pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            col_widths: headers.iter().map(|h| h.width()).collect(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (width, cell) in self.col_widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    fn border(&self, left: &str, junction: &str, right: &str) -> String {
        let inner = self
            .col_widths
            .iter()
            .map(|w| glyphs::HORIZONTAL.repeat(w + 2))
            .collect::<Vec<_>>()
            .join(junction);
        format!("{}{}{}", left, inner, right)
    }

    fn print_cells(&self, cells: &[String], color: CtColor) {
        print!("{}", glyphs::VERTICAL.with(colors::TEAL));
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            print!(
                " {}{} {}",
                cell.with(color),
                " ".repeat(width.saturating_sub(cell.width())),
                glyphs::VERTICAL.with(colors::TEAL)
            );
        }
        println!();
    }

    pub fn print(&self) {
        println!(
            "{}",
            self.border(glyphs::TOP_LEFT, glyphs::T_TOP, glyphs::TOP_RIGHT)
                .with(colors::TEAL)
        );
        self.print_cells(&self.headers, colors::AMBER);
        println!(
            "{}",
            self.border(glyphs::T_LEFT, glyphs::CROSS, glyphs::T_RIGHT)
                .with(colors::TEAL)
        );
        for row in &self.rows {
            self.print_cells(row, colors::WHITE);
        }
        println!(
            "{}",
            self.border(glyphs::BOTTOM_LEFT, glyphs::T_BOTTOM, glyphs::BOTTOM_RIGHT)
                .with(colors::TEAL)
        );
    }
}

pub fn get_prompt() -> String {
    format!("{} ", "billboard-auth ❯".with(colors::AMBER).bold())
}

pub fn print_command_echo(command: &str) {
    println!(
        "{} {}",
        "❯".with(colors::AMBER).bold(),
        command.with(colors::GREEN).bold()
    );
}

pub fn print_welcome(db_path: &str) {
    print_section_header("Billboard user administration");
    print_key_value("Database", db_path);
    print_key_value("Version", env!("CARGO_PKG_VERSION"));
    print_key_value("Help", "type 'help' for the list of commands");
    print_section_footer();
}

pub struct CommandHelp {
    pub name: &'static str,
    pub args: &'static str,
    pub description: &'static str,
}

const COMMAND_GROUPS: &[(&str, &[&str])] = &[
    ("Users", &["add-user", "user-handles", "show"]),
    (
        "Passwords",
        &["add-login", "update-login", "delete-login", "check-password"],
    ),
    ("Roles", &["list-roles", "set-role"]),
    ("System", &["where", "exit", "help"]),
];

pub fn print_help(commands: &[CommandHelp]) {
    print_section_header("Commands");
    for (title, names) in COMMAND_GROUPS {
        println!("  {}", title.with(colors::TEAL).bold());
        for cmd in commands.iter().filter(|c| names.contains(&c.name)) {
            println!(
                "      {} {}  {}",
                cmd.name.with(colors::GREEN).bold(),
                cmd.args.with(colors::DIM),
                cmd.description.with(colors::WHITE)
            );
        }
        println!();
    }
    print_section_footer();
}

pub fn print_goodbye() {
    println!();
    println!("  {}", "Bye.".with(colors::AMBER).bold());
    println!();
}
