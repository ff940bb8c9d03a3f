//! multipage demo
//!
//! A calculator-and-algorithms menu that exercises the navigator.

use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;

use multipage::config::{Config, StyleKind};
use multipage::logging;
use multipage::tui::console::ConsoleTerminal;
use multipage::tui::terminal::{shared, SharedTerminal};
use multipage::tui::theme;
use multipage::tui::writer::INVALID_INPUT;
use multipage::{Breadcrumb, Navigator, PageOptions, Result, Selection};

const BANNER: &str = r"
 __    __   __  __   __       ______  __
/\ \-./  \ /\ \/\ \ /\ \     /\__  _\/\ \
\ \ \-./\ \\ \ \_\ \\ \ \____\/_/\ \/\ \ \
 \ \_\ \ \_\\ \_____\\ \_____\  \ \_\ \ \_\
  \/_/  \/_/ \/_____/ \/_____/   \/_/  \/_/
";

#[derive(Parser)]
#[command(name = "multipage")]
#[command(about = "Multi-column terminal menus: a calculator and algorithms demo")]
#[command(version)]
struct Cli {
    /// Config file (default: per-user config directory, if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Columns available to the right of the home page
    #[arg(long)]
    max_columns: Option<usize>,

    /// Display style
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Window title
    #[arg(long)]
    title: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Go straight to the home page
    #[arg(long)]
    skip_intro: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    Fixed,
    Breadcrumb,
}

impl From<StyleArg> for StyleKind {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::Fixed => StyleKind::Fixed,
            StyleArg::Breadcrumb => StyleKind::Breadcrumb,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &config.log_file {
        if let Err(e) = logging::init(path) {
            eprintln!("Note: logging disabled ({}: {})", path.display(), e);
        }
    }

    match run_demo(&config, cli.skip_intro) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// CONFIG RESOLUTION
// ============================================================================

/// File (or defaults) first, then command-line overrides.
fn resolve_config(cli: &Cli) -> std::result::Result<Config, String> {
    let mut config = Config::load_or_default(cli.config.as_deref()).map_err(|e| e.to_string())?;

    if let Some(max_columns) = cli.max_columns {
        config.max_columns = max_columns;
    }
    if let Some(style) = cli.style {
        config.style = style.into();
    }
    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

// ============================================================================
// SESSION
// ============================================================================

fn run_demo(config: &Config, skip_intro: bool) -> Result<()> {
    let terminal = shared(ConsoleTerminal::setup()?);

    let product = if skip_intro {
        None
    } else {
        Some(intro(&terminal, &config.title)?)
    };

    let mut nav = Navigator::new(Rc::clone(&terminal), &config.title, config.max_columns)?
        .with_style(config.style.strategy());
    register_pages(&mut nav)?;

    nav.navigate_page("Home")?;
    if let Some(product) = product {
        show_product(&nav, product)?;
    }
    nav.run()
}

/// The intro's answer, where action output would go.
fn show_product(nav: &Navigator, product: Option<i64>) -> Result<()> {
    let answer = product.map_or_else(|| INVALID_INPUT.to_string(), |p| p.to_string());
    nav.writer()?.out(&format!("Answer: {}", answer))?;
    Ok(())
}

/// Banner plus a two-number warm-up on a single full-width surface.
fn intro(terminal: &SharedTerminal, title: &str) -> Result<Option<i64>> {
    let mut intro = Navigator::new(Rc::clone(terminal), title, 1)?.with_style(Rc::new(Breadcrumb));
    let mut line = intro.writer_at(1, 0)?;
    for art in BANNER.lines() {
        line.out_coloured(art, theme::BANNER)?;
    }
    line.out("Multiply: ")?;
    let a = line.get()?;
    line.out("with: ")?;
    let b = line.get()?;
    intro.clear_console()?;
    Ok(a.zip(b).and_then(|(a, b)| a.checked_mul(b)))
}

// ============================================================================
// PAGES
// ============================================================================

fn register_pages(nav: &mut Navigator) -> Result<()> {
    let home = PageOptions::default()
        .with_title_colour(theme::ACCENT)
        .without_back_button();
    let section = PageOptions::default().with_title_colour(theme::ERROR);

    nav.create_page(
        "Home",
        vec![
            Selection::new("Exit", |nav| nav.clear_console()),
            Selection::link("Mathematical Operations", "Mathematical Operations"),
            Selection::link("Algorithms", "Algorithms"),
        ],
        home,
    )?;

    nav.create_page(
        "Mathematical Operations",
        vec![
            Selection::new("Addition", |nav| binary_operation(nav, Operation::Add)),
            Selection::new("Subtraction", |nav| binary_operation(nav, Operation::Subtract)),
            Selection::new("Multiplication", |nav| binary_operation(nav, Operation::Multiply)),
            Selection::new("Division", |nav| binary_operation(nav, Operation::Divide)),
            Selection::new("Pythagoras", pythagoras),
        ],
        section,
    )?;

    nav.create_page(
        "Algorithms",
        vec![
            Selection::new("Linear Search", linear_search_page),
            Selection::new("Sort", |nav| list_operation(nav, "Sort", ListOperation::Sort)),
            Selection::new("Maximum", |nav| list_operation(nav, "Maximum", ListOperation::Max)),
            Selection::new("Minimum", |nav| list_operation(nav, "Minimum", ListOperation::Min)),
            Selection::new("BMI Calculator", bmi_page),
        ],
        section,
    )?;

    Ok(())
}

// ============================================================================
// ACTIONS
// ============================================================================

fn binary_operation(nav: &mut Navigator, op: Operation) -> Result<()> {
    let mut line = nav.writer()?;
    line.out(op.prompt())?;
    let a = line.get()?;
    line.out(op.joiner())?;
    let b = line.get()?;

    let message = match a.zip(b).map(|(a, b)| op.apply(a, b)) {
        Some(Some(answer)) => format!("Answer: {}", answer),
        Some(None) => "No answer: out of range or division by zero.".to_string(),
        None => String::new(), // check reports the bad input
    };
    line.check(&message)?;
    Ok(())
}

fn pythagoras(nav: &mut Navigator) -> Result<()> {
    let mut line = nav.writer()?;
    line.out("Side a: ")?;
    let a = line.get()?;
    line.out("Side b: ")?;
    let b = line.get()?;

    let message = a
        .zip(b)
        .map(|(a, b)| format!("Hypotenuse: {:.2}", hypotenuse(a, b)))
        .unwrap_or_default();
    line.check(&message)?;
    Ok(())
}

fn linear_search_page(nav: &mut Navigator) -> Result<()> {
    let mut line = nav.writer()?;
    line.out("Values, one per line (blank ends):")?;
    let values = line.get_list()?;
    line.out("Search for: ")?;
    let query = line.get()?;

    let message = match query {
        Some(q) => match linear_search(&values, q) {
            Some(index) => format!("The value {} exists at index {}.", q, index),
            None => format!("The value {} is not in the list.", q),
        },
        None => String::new(),
    };
    line.check(&message)?;
    Ok(())
}

fn list_operation(nav: &mut Navigator, heading: &str, op: ListOperation) -> Result<()> {
    let mut line = nav.writer()?;
    line.out(heading)?;
    line.out("Values, one per line (blank ends):")?;
    let values = line.get_list()?;
    line.out(&op.describe(&values))?;
    Ok(())
}

fn bmi_page(nav: &mut Navigator) -> Result<()> {
    let mut line = nav.writer()?;
    line.out("Height (cm): ")?;
    let height = line.get()?;
    line.out("Weight (kg): ")?;
    let weight = line.get()?;

    let message = match height.zip(weight) {
        Some((h, w)) => match bmi(w, h) {
            Some(value) => format!("BMI {:.1}: {}", value, bmi_category(value)),
            None => "Height must be positive.".to_string(),
        },
        None => String::new(),
    };
    line.check(&message)?;
    Ok(())
}

// ============================================================================
// CALCULATIONS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    fn prompt(self) -> &'static str {
        match self {
            Operation::Add => "Add: ",
            Operation::Subtract => "Subtract: ",
            Operation::Multiply => "Multiply: ",
            Operation::Divide => "Divide: ",
        }
    }

    fn joiner(self) -> &'static str {
        match self {
            Operation::Add => "to: ",
            Operation::Subtract => "from: ",
            Operation::Multiply => "with: ",
            Operation::Divide => "by: ",
        }
    }

    /// `None` on overflow or division by zero.
    ///
    /// Reads the way the prompts do: "Subtract a from b" is `b - a`.
    fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Operation::Add => a.checked_add(b),
            Operation::Subtract => b.checked_sub(a),
            Operation::Multiply => a.checked_mul(b),
            Operation::Divide => a.checked_div(b),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListOperation {
    Sort,
    Max,
    Min,
}

impl ListOperation {
    fn describe(self, values: &[i64]) -> String {
        if values.is_empty() {
            return "The list is empty.".to_string();
        }
        match self {
            ListOperation::Sort => {
                let mut sorted = values.to_vec();
                sorted.sort_unstable();
                let joined: Vec<String> = sorted.iter().map(i64::to_string).collect();
                format!("Sorted: {}", joined.join(", "))
            }
            ListOperation::Max => format!("Maximum: {}", values.iter().max().copied().unwrap_or_default()),
            ListOperation::Min => format!("Minimum: {}", values.iter().min().copied().unwrap_or_default()),
        }
    }
}

fn hypotenuse(a: i64, b: i64) -> f64 {
    (a as f64).hypot(b as f64)
}

fn linear_search(values: &[i64], target: i64) -> Option<usize> {
    values.iter().position(|&v| v == target)
}

/// Body-mass index from kilograms and centimetres.
fn bmi(weight_kg: i64, height_cm: i64) -> Option<f64> {
    if height_cm <= 0 {
        return None;
    }
    let metres = height_cm as f64 / 100.0;
    Some(weight_kg as f64 / (metres * metres))
}

fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Healthy"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use multipage::tui::script::ScriptedTerminal;

    #[test]
    fn operations_follow_their_prompts() {
        assert_eq!(Operation::Add.apply(1, 2), Some(3));
        assert_eq!(Operation::Subtract.apply(2, 4), Some(2));
        assert_eq!(Operation::Multiply.apply(3, 4), Some(12));
        assert_eq!(Operation::Divide.apply(8, 2), Some(4));
    }

    #[test]
    fn division_by_zero_and_overflow_have_no_answer() {
        assert_eq!(Operation::Divide.apply(1, 0), None);
        assert_eq!(Operation::Add.apply(i64::MAX, 1), None);
    }

    #[test]
    fn hypotenuse_of_three_four() {
        assert!((hypotenuse(3, 4) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn linear_search_finds_first_match() {
        assert_eq!(linear_search(&[4, 7, 7], 7), Some(1));
        assert_eq!(linear_search(&[4, 7], 9), None);
    }

    #[test]
    fn list_operations_describe_results() {
        assert_eq!(ListOperation::Sort.describe(&[3, 1, 2]), "Sorted: 1, 2, 3");
        assert_eq!(ListOperation::Max.describe(&[3, 9, 2]), "Maximum: 9");
        assert_eq!(ListOperation::Min.describe(&[3, 9, 2]), "Minimum: 2");
        assert_eq!(ListOperation::Min.describe(&[]), "The list is empty.");
    }

    #[test]
    fn bmi_categories() {
        let value = bmi(70, 175).unwrap();
        assert!((value - 22.857).abs() < 0.01);
        assert_eq!(bmi_category(value), "Healthy");
        assert_eq!(bmi_category(17.0), "Underweight");
        assert_eq!(bmi_category(27.0), "Overweight");
        assert_eq!(bmi_category(31.0), "Obese");
        assert_eq!(bmi(70, 0), None);
    }

    #[test]
    fn addition_page_end_to_end() {
        // Home: 1 → Mathematical Operations, 1 → Addition, then interrupt.
        let term = ScriptedTerminal::new(120, 30)
            .with_keys("11")
            .with_lines(["2", "3"]);
        let mut nav = Navigator::new(shared(term.clone()), "Multi", 3).unwrap();
        register_pages(&mut nav).unwrap();
        nav.navigate_page("Home").unwrap();

        nav.run().unwrap();

        assert!(term.written().iter().any(|w| w.text == "Answer: 5"));
        let pages: Vec<_> = nav.stack().pages().collect();
        assert_eq!(pages, vec!["Home", "Mathematical Operations"]);
        assert!(nav.stack().has_transient());
    }

    #[test]
    fn intro_answer_is_visible_in_both_styles() {
        for style in [StyleKind::Fixed, StyleKind::Breadcrumb] {
            let term = ScriptedTerminal::new(120, 30);
            let mut nav = Navigator::new(shared(term.clone()), "Multi", 3)
                .unwrap()
                .with_style(style.strategy());
            register_pages(&mut nav).unwrap();
            nav.navigate_page("Home").unwrap();

            show_product(&nav, Some(12)).unwrap();

            assert!(term.shows("Answer: 12"));
            assert!(term.shows("Exit"));
        }
    }

    #[test]
    fn bad_operand_reports_invalid_input() {
        let term = ScriptedTerminal::new(120, 30)
            .with_keys("14")
            .with_lines(["six", "3"]);
        let mut nav = Navigator::new(shared(term.clone()), "Multi", 3).unwrap();
        register_pages(&mut nav).unwrap();
        nav.navigate_page("Home").unwrap();

        nav.run().unwrap();

        assert!(term.written().iter().any(|w| w.text == "Invalid input."));
        assert!(!term.written().iter().any(|w| w.text.starts_with("Answer")));
    }
}
