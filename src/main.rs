//! Face Anim Edit CLI - Inspect and edit animation expression tracks.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::{Path, PathBuf};

use face_anim_edit::{
    animation::{
        CONTROL_BYTE_OFFSET, Category, HostClock, PlaybackDriver, RigSink, UnknownCategory,
        read_animation, write_animation,
    },
    schema::{EditScript, EditorConfig},
    segment::{EditorError, ExpressionEditor, RangeWrite, Section, section_at},
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Parsed command line.
struct Invocation {
    anim_path: PathBuf,
    command: Vec<String>,
    config_path: Option<PathBuf>,
    out_path: Option<PathBuf>,
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example();
        return;
    }

    let invocation = match parse_args(&args[1..]) {
        Some(invocation) => invocation,
        None => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&invocation) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <anim> <command> [options]", program);
    eprintln!();
    eprintln!("Inspect and edit the eye/mouth expression tracks of an animation.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  info                               Frame and section counts");
    eprintln!("  sections <eye|mouth>               List expression sections");
    eprintln!("  set <eye|mouth> <start> <end> <expr>");
    eprintln!("                                     Set an expression on frames start..=end");
    eprintln!("  apply <script.json>                Apply a batch edit script");
    eprintln!("  play [ticks]                       Headless playback");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>  Editor configuration (JSON)");
    eprintln!("  --out <path>     Write edits here instead of the input file");
    eprintln!();
    eprintln!("Example configuration and script are printed with --example.");
}

fn parse_args(args: &[String]) -> Option<Invocation> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut out_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(iter.next()?)),
            "--out" => out_path = Some(PathBuf::from(iter.next()?)),
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() < 2 {
        return None;
    }
    let anim_path = PathBuf::from(positional.remove(0));

    Some(Invocation {
        anim_path,
        command: positional,
        config_path,
        out_path,
    })
}

fn load_config(path: Option<&Path>) -> Result<EditorConfig, EditorError> {
    let config = match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| EditorError::io(path, e))?;
            serde_json::from_str(&json)?
        }
        None => EditorConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(invocation: &Invocation) -> Result<(), CliError> {
    let config = load_config(invocation.config_path.as_deref())?;

    let path = &invocation.anim_path;
    let bytes = read_animation(path).map_err(|e| EditorError::io(path, e))?;
    let mut editor = ExpressionEditor::new();
    editor.load(bytes)?;

    let command: Vec<&str> = invocation.command.iter().map(String::as_str).collect();
    match command.as_slice() {
        ["info"] => print_info(&editor)?,
        ["sections", category] => print_sections(&editor, category.parse::<Category>()?)?,
        ["set", category, start, end, expression] => {
            let category: Category = category.parse()?;
            let write = RangeWrite::new(
                category,
                parse_frame(start)?,
                parse_frame(end)?,
                category.parse_code(expression).ok_or_else(|| {
                    CliError::Usage(format!(
                        "'{}' is not a valid {} expression (expected one of {} or 0-15)",
                        expression,
                        category,
                        category.labels().join(", ")
                    ))
                })?,
            );
            editor.apply_range_write(&write)?;
            print_sections(&editor, category)?;
            save(&editor, invocation, &config)?;
        }
        ["apply", script_path] => {
            let json = fs::read_to_string(script_path)
                .map_err(|e| EditorError::io(*script_path, e))?;
            let script = EditScript::from_json(&json).map_err(EditorError::from)?;
            let applied = script.apply(&mut editor)?;
            println!("Applied {} edits", applied);
            save(&editor, invocation, &config)?;
        }
        ["play"] => play(&editor, &config, config.playback.tick_limit)?,
        ["play", ticks] => {
            let ticks = ticks
                .parse::<u64>()
                .map_err(|_| CliError::Usage(format!("Invalid tick count '{}'", ticks)))?;
            play(&editor, &config, ticks)?;
        }
        _ => {
            return Err(CliError::Usage(format!(
                "Unknown command '{}'",
                invocation.command.join(" ")
            )));
        }
    }

    Ok(())
}

fn parse_frame(s: &str) -> Result<i64, CliError> {
    s.parse()
        .map_err(|_| CliError::Usage(format!("Invalid frame number '{}'", s)))
}

fn save(
    editor: &ExpressionEditor,
    invocation: &Invocation,
    config: &EditorConfig,
) -> Result<(), CliError> {
    let path = match &invocation.out_path {
        Some(path) => path,
        None if config.overwrite => &invocation.anim_path,
        None => {
            return Err(CliError::Usage(
                "Overwriting is disabled in the configuration; pass --out <path>".into(),
            ));
        }
    };
    write_animation(path, editor.save()?).map_err(|e| EditorError::io(path, e))?;
    println!("Saved {}", path.display());
    Ok(())
}

fn print_info(editor: &ExpressionEditor) -> Result<(), EditorError> {
    let tracks = editor.tracks()?;
    println!("Animation");
    println!("=========");
    println!("Frames: {}", tracks.frame_count());
    println!("Bytes: {}", tracks.buffer().as_bytes().len());
    for category in Category::ALL {
        println!(
            "{} sections: {}",
            category,
            tracks.sections(category).len()
        );
    }
    Ok(())
}

fn print_sections(editor: &ExpressionEditor, category: Category) -> Result<(), EditorError> {
    for (i, section) in editor.sections(category)?.iter().enumerate() {
        println!("  [{}] {}", i, section.describe(category));
    }
    Ok(())
}

/// Host clock for headless playback; never paused.
struct FreeRunningClock;

impl HostClock for FreeRunningClock {
    fn is_paused(&self) -> bool {
        false
    }
}

/// Rig that prints the expressions it is handed, along with the index of
/// the section each one belongs to.
struct PrintingRig<'a> {
    eye: &'a [Section],
    mouth: &'a [Section],
}

impl PrintingRig<'_> {
    fn column(&self, category: Category, frame: usize, control: u8) -> String {
        let sections = match category {
            Category::Eye => self.eye,
            Category::Mouth => self.mouth,
        };
        let label = category.describe_code(category.decode(control));
        match section_at(sections, frame) {
            Some(idx) => format!("{} [{}]", label, idx),
            None => label,
        }
    }
}

impl RigSink for PrintingRig<'_> {
    fn set_frozen(&mut self, frozen: bool) {
        println!("  rig {}", if frozen { "frozen" } else { "released" });
    }

    fn apply_frame(&mut self, frame: usize, data: &[u8]) {
        let control = data[CONTROL_BYTE_OFFSET];
        println!(
            "  frame {:>5}: eye={:<12} mouth={}",
            frame,
            self.column(Category::Eye, frame, control),
            self.column(Category::Mouth, frame, control)
        );
    }
}

fn play(editor: &ExpressionEditor, config: &EditorConfig, ticks: u64) -> Result<(), EditorError> {
    let tracks = editor.tracks()?;
    let buffer = tracks.buffer();
    let mut driver = PlaybackDriver::new(&config.playback);
    let mut rig = PrintingRig {
        eye: tracks.sections(Category::Eye),
        mouth: tracks.sections(Category::Mouth),
    };

    println!("Playing {} ticks", ticks);
    driver.play();
    for _ in 0..ticks {
        driver.tick(&FreeRunningClock, Some(buffer), &mut rig);
    }
    // One more tick after stopping releases the rig.
    driver.stop();
    driver.tick(&FreeRunningClock, Some(buffer), &mut rig);
    Ok(())
}

fn print_example() {
    let config = EditorConfig::default();
    let script = EditScript::example();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
    println!();
    println!("Example edit script (script.json):");
    match serde_json::to_string_pretty(&script) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing script: {}", e),
    }
}
