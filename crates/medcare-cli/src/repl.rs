//! Interactive shell loop.
//!
//! A rustyline-based REPL that drives the shell controller: it renders the
//! login gate or the navigational frame as plain text and forwards each
//! command to the application layer. Command completion and hints cover
//! the fixed command set.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use medcare_application::{
    Enrollment, PatientRosterService, RosterPage, RosterQuery, ShellController, ShellView,
};
use medcare_core::config::ShellConfig;
use medcare_core::navigation::{main_menu, MenuItem, MenuOutcome, NavigationState, Page};
use medcare_core::patient::{Gender, Patient};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

const COMMANDS: &[&str] = &[
    "login", "logout", "whoami", "menu", "select", "go", "pages", "sidebar", "expand",
    "patients", "patient", "enroll", "visit", "next", "prev", "help", "quit",
];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Only the command word completes; arguments are free-form.
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let command = line.split_whitespace().next().unwrap_or("");
        if self.commands.iter().any(|c| c == command) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if !line.is_empty() && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Runs the shell loop until the user quits.
pub async fn run(
    controller: ShellController,
    roster: PatientRosterService,
    config: ShellConfig,
) -> Result<()> {
    println!("{}", "MedCare".bold());

    println!("{}", "Loading session...".dimmed());
    controller.hydrate().await?;

    match controller.current_clinician().await {
        Some(clinician) => println!("Signed in as {}.", clinician.name.green()),
        None => println!("Not signed in. Use {} to begin.", "login <username>".bold()),
    }

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    let mut query = RosterQuery {
        page_size: config.page_size.max(1),
        ..RosterQuery::default()
    };

    loop {
        let prompt = prompt_for(controller.view().await);

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line.as_str());

        if !dispatch(&line, &controller, &roster, &mut query, &mut rl).await? {
            break;
        }
    }

    Ok(())
}

fn prompt_for(view: ShellView) -> String {
    match view {
        ShellView::Loading => "medcare (loading)> ".to_string(),
        ShellView::Login => "medcare (signed out)> ".to_string(),
        ShellView::Shell { current_page } => format!("medcare:{}> ", current_page),
    }
}

/// Executes one command line. Returns `false` when the loop should end.
async fn dispatch(
    line: &str,
    controller: &ShellController,
    roster: &PatientRosterService,
    query: &mut RosterQuery,
    rl: &mut Editor<CliHelper, DefaultHistory>,
) -> Result<bool> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match command {
        "quit" | "exit" => return Ok(false),
        "help" => print_help(),
        "login" => handle_login(controller, &args, rl).await?,
        "logout" => {
            controller.logout().await?;
            *query = RosterQuery {
                page_size: query.page_size,
                ..RosterQuery::default()
            };
            println!("Signed out.");
        }
        "whoami" => match controller.current_clinician().await {
            Some(clinician) => {
                println!(
                    "{} (@{}) [{}]",
                    clinician.name.bold(),
                    clinician.username,
                    clinician.initials()
                );
                if let Some(avatar) = &clinician.avatar {
                    println!("  avatar: {}", avatar.dimmed());
                }
            }
            None => println!("Not signed in."),
        },
        "menu" => with_shell(controller.navigation().await.map(|nav| render_menu(&nav)))?,
        "pages" => {
            use strum::IntoEnumIterator;
            for page in Page::iter() {
                println!("  {:<18} {}", page.to_string(), page.title().dimmed());
            }
        }
        "go" => {
            let id = args.first().copied().unwrap_or("");
            handle_go(controller, roster, query, id).await?;
        }
        "select" => {
            let id = args.first().copied().unwrap_or("");
            handle_select(controller, roster, query, id).await?;
        }
        "sidebar" => with_shell(controller.toggle_sidebar().await.map(|collapsed| {
            if collapsed {
                println!("Sidebar collapsed.");
            } else {
                println!("Sidebar expanded.");
            }
        }))?,
        "expand" => {
            let id = args.first().copied().unwrap_or("");
            with_shell(controller.toggle_group(id).await.map(|expanded| {
                if expanded {
                    println!("Group '{}' expanded.", id);
                } else {
                    println!("Group '{}' collapsed.", id);
                }
            }))?
        }
        "patients" => {
            // A new search always starts back at page 1.
            *query = query.clone().with_search(args.join(" "));
            let page = roster.query(query).await?;
            render_roster(&page, query);
        }
        "next" | "prev" => {
            let current = roster.query(query).await?;
            if command == "next" {
                if query.page < current.page_count {
                    query.page += 1;
                } else {
                    println!("{}", "Already on the last page.".dimmed());
                }
            } else if query.page > 1 {
                query.page -= 1;
            } else {
                println!("{}", "Already on the first page.".dimmed());
            }
            let page = roster.query(query).await?;
            render_roster(&page, query);
        }
        "patient" => {
            let id = args.first().copied().unwrap_or("");
            match roster.get(id).await {
                Ok(patient) => render_patient(&patient),
                Err(e) if e.is_not_found() => {
                    println!("{}", format!("No patient '{}'.", id).red())
                }
                Err(e) => return Err(e.into()),
            }
        }
        "visit" => {
            let id = args.first().copied().unwrap_or("");
            match roster.record_visit(id).await {
                Ok(patient) => println!(
                    "Recorded visit for {} on {}.",
                    patient.name,
                    patient.last_visit.as_deref().unwrap_or("-")
                ),
                Err(e) if e.is_not_found() => {
                    println!("{}", format!("No patient '{}'.", id).red())
                }
                Err(e) => return Err(e.into()),
            }
        }
        "enroll" => handle_enroll(roster, rl).await?,
        _ => println!("Unknown command '{}'. Try 'help'.", command),
    }

    Ok(true)
}

/// Maps "not signed in" errors to a friendly message instead of aborting.
fn with_shell<T>(result: medcare_core::error::Result<T>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.is_auth() => {
            println!("Please sign in first ({}).", "login <username>".bold());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn handle_login(
    controller: &ShellController,
    args: &[&str],
    rl: &mut Editor<CliHelper, DefaultHistory>,
) -> Result<()> {
    let Some(username) = args.first() else {
        println!("Usage: login <username>");
        return Ok(());
    };

    let secret = match args.get(1) {
        Some(secret) => secret.to_string(),
        None => rl.readline("Password: ")?,
    };

    println!("{}", "Signing in...".dimmed());
    if controller.login(username, secret.trim()).await? {
        let clinician = controller.current_clinician().await;
        let name = clinician.map(|c| c.name).unwrap_or_default();
        println!("Welcome, {}.", name.green());
    } else {
        println!("{}", "Invalid credentials.".red());
    }

    Ok(())
}

async fn handle_go(
    controller: &ShellController,
    roster: &PatientRosterService,
    query: &RosterQuery,
    id: &str,
) -> Result<()> {
    match controller.open_page(id).await {
        Ok(page) => render_page(page, roster, query).await?,
        Err(e) if e.is_not_found() => {
            // Render-layer fallback: unknown ids land on the default page.
            let fallback = Page::default();
            println!(
                "{}",
                format!("Unknown page '{}'; showing {} instead.", id, fallback).yellow()
            );
            match controller.open_page(&fallback.to_string()).await {
                Ok(page) => render_page(page, roster, query).await?,
                Err(e) => with_shell::<()>(Err(e))?,
            }
        }
        Err(e) => with_shell::<()>(Err(e))?,
    }
    Ok(())
}

async fn handle_select(
    controller: &ShellController,
    roster: &PatientRosterService,
    query: &RosterQuery,
    id: &str,
) -> Result<()> {
    let item = find_menu_item(id);
    let Some(item) = item else {
        println!("{}", format!("No menu entry '{}'.", id).yellow());
        return Ok(());
    };

    match controller.activate_menu_item(&item).await {
        Ok(MenuOutcome::PageSelected(page)) => render_page(page, roster, query).await?,
        Ok(MenuOutcome::GroupToggled { expanded }) => {
            if expanded {
                println!("Group '{}' expanded.", item.id);
            } else {
                println!("Group '{}' collapsed.", item.id);
            }
        }
        Err(e) => with_shell::<()>(Err(e))?,
    }
    Ok(())
}

fn find_menu_item(id: &str) -> Option<MenuItem> {
    for item in main_menu() {
        if item.id == id {
            return Some(item);
        }
        if let Some(child) = item.children.iter().find(|child| child.id == id) {
            return Some(child.clone());
        }
    }
    None
}

async fn handle_enroll(
    roster: &PatientRosterService,
    rl: &mut Editor<CliHelper, DefaultHistory>,
) -> Result<()> {
    let name = rl.readline("  Name: ")?.trim().to_string();
    if name.is_empty() {
        println!("{}", "Enrollment cancelled (name is required).".yellow());
        return Ok(());
    }

    let age: u8 = match rl.readline("  Age: ")?.trim().parse() {
        Ok(age) => age,
        Err(_) => {
            println!("{}", "Enrollment cancelled (age must be a number).".yellow());
            return Ok(());
        }
    };

    let gender: Gender = match rl.readline("  Gender (male/female): ")?.trim().parse() {
        Ok(gender) => gender,
        Err(_) => {
            println!("{}", "Enrollment cancelled (unrecognized gender).".yellow());
            return Ok(());
        }
    };

    let phone = rl.readline("  Phone: ")?.trim().to_string();
    let email = rl.readline("  Email: ")?.trim().to_string();
    let address = rl.readline("  Address: ")?.trim().to_string();
    let condition = rl.readline("  Condition: ")?.trim().to_string();

    let patient = roster
        .enroll(Enrollment {
            name,
            age,
            gender,
            phone,
            email,
            address,
            condition,
        })
        .await?;

    println!("Enrolled {} as {}.", patient.name.green(), patient.id.bold());
    Ok(())
}

async fn render_page(
    page: Page,
    roster: &PatientRosterService,
    query: &RosterQuery,
) -> Result<()> {
    println!("{}", page.title().bold());
    match page {
        Page::Dashboard => {
            println!("{}", "Overview of clinic activity and key metrics.".dimmed())
        }
        Page::ExistingPatients => {
            let results = roster.query(query).await?;
            render_roster(&results, query);
        }
        Page::EnrollPatients => println!(
            "{}",
            "Register new patients into the system ('enroll').".dimmed()
        ),
        Page::Diagnosis => println!(
            "{}",
            "Historical diagnosis data, analytics, and case reviews.".dimmed()
        ),
        Page::Flagged => println!(
            "{}",
            "Cases flagged by the AI system for human review.".dimmed()
        ),
        Page::Config => println!("{}", "System settings and user preferences.".dimmed()),
    }
    Ok(())
}

fn render_menu(nav: &NavigationState) {
    if nav.is_sidebar_collapsed() {
        println!("{}", "(sidebar collapsed - 'sidebar' to expand)".dimmed());
    }

    for item in main_menu() {
        let active = item.contains_page(nav.current_page());
        let marker = if active { ">" } else { " " };

        if item.is_group() {
            let state = if nav.is_group_expanded(item.id) { "[-]" } else { "[+]" };
            println!("{} {} {}", marker, item.label.bold(), state);
            if nav.is_group_expanded(item.id) && !nav.is_sidebar_collapsed() {
                for child in &item.children {
                    let child_marker = if child.page == Some(nav.current_page()) {
                        ">"
                    } else {
                        " "
                    };
                    println!("    {} {} ({})", child_marker, child.label, child.id.dimmed());
                }
            }
        } else {
            println!("{} {} ({})", marker, item.label, item.id.dimmed());
        }
    }
}

fn render_roster(results: &RosterPage, query: &RosterQuery) {
    if !query.search.trim().is_empty() {
        println!("Filter: {:?}", query.search);
    }

    if results.patients.is_empty() {
        println!("{}", "No patients found.".dimmed());
        return;
    }

    for patient in &results.patients {
        println!(
            "  {}  {:<24} {:>3}  {:<7}  {:<18} {:<9} last visit {}",
            patient.id.bold(),
            patient.name,
            patient.age,
            patient.gender.to_string(),
            patient.condition,
            patient.status.to_string(),
            patient.last_visit.as_deref().unwrap_or("-")
        );
    }

    let start = (results.page - 1) * query.page_size + 1;
    let end = start + results.patients.len() - 1;
    println!(
        "Showing {} to {} of {} patients (page {} of {})",
        start,
        end,
        results.filtered,
        results.page,
        results.page_count.max(1)
    );
}

fn render_patient(patient: &Patient) {
    println!("{}  {}", patient.id.bold(), patient.name.bold());
    println!("  age {}, {}", patient.age, patient.gender);
    println!("  condition: {}", patient.condition);
    println!("  status:    {}", patient.status);
    println!("  phone:     {}", patient.phone);
    println!("  email:     {}", patient.email);
    println!("  address:   {}", patient.address);
    println!(
        "  last visit {}",
        patient.last_visit.as_deref().unwrap_or("-")
    );
}

fn print_help() {
    println!("{}", "Session".bold());
    println!("  login <username> [password]   sign in (prompts for the password)");
    println!("  logout                        sign out");
    println!("  whoami                        show the signed-in clinician");
    println!("{}", "Navigation".bold());
    println!("  menu                          show the sidebar");
    println!("  select <entry>                activate a sidebar entry (page or group)");
    println!("  go <page-id>                  open a page directly");
    println!("  pages                         list page identifiers");
    println!("  sidebar                       collapse/expand the sidebar");
    println!("  expand <group>                toggle a menu group");
    println!("{}", "Patients".bold());
    println!("  patients [search]             list patients (filter by id or name)");
    println!("  next / prev                   page through the roster");
    println!("  patient <id>                  show one record");
    println!("  enroll                        register a new patient");
    println!("  visit <id>                    record a visit today");
    println!("{}", "General".bold());
    println!("  help, quit");
}
