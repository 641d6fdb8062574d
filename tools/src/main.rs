//! office-runner: headless driver for the virtual office.
//!
//! Usage:
//!   office-runner --seed 12345 --ticks 30
//!   office-runner --config office.json --ipc-mode

mod stage;

use anyhow::{Context, Result};
use office_core::{
    clock::SimSpeed,
    command::{CommandOutcome, OfficeCommand},
    config::OfficeConfig,
    OfficeSim,
};
use serde::{Deserialize, Serialize};
use stage::{MarkerView, Stage};
use std::env;
use std::io::{self, BufRead, Write};

/// A button in the UI that boosts one department by a fixed amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActionBinding {
    id: String,
    label: String,
    department: String,
    amount: i64,
}

/// Office config plus the presentation-side mappings.
#[derive(Debug, Clone, Deserialize)]
struct RunnerConfig {
    #[serde(flatten)]
    office: OfficeConfig,
    #[serde(default = "default_hire_department")]
    hire_department: String,
    #[serde(default = "default_actions")]
    actions: Vec<ActionBinding>,
    #[serde(default = "default_initial_hires")]
    initial_hires: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            office: OfficeConfig::default_office(),
            hire_department: default_hire_department(),
            actions: default_actions(),
            initial_hires: default_initial_hires(),
        }
    }
}

impl RunnerConfig {
    fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
        let config: RunnerConfig = serde_json::from_str(&content)?;
        config.office.validate()?;
        Ok(config)
    }

    fn action(&self, id: &str) -> Option<&ActionBinding> {
        self.actions.iter().find(|a| a.id == id)
    }
}

fn default_hire_department() -> String {
    "Sales".into()
}

fn default_actions() -> Vec<ActionBinding> {
    vec![
        ActionBinding {
            id: "budget".into(),
            label: "Marketing budget boost".into(),
            department: "Marketing".into(),
            amount: 20,
        },
        ActionBinding {
            id: "optimize".into(),
            label: "Delivery optimize boost".into(),
            department: "Delivery".into(),
            amount: 30,
        },
    ]
}

fn default_initial_hires() -> Vec<String> {
    ["Sales", "Marketing", "Delivery", "Management"].map(String::from).to_vec()
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Hire { department: Option<String> },
    Action { id: String },
    Boost { department: String, amount: i64 },
    Tick { count: u64 },
    Advance { ms: u64 },
    Pause,
    Resume,
    SetSpeed { speed: SimSpeed },
    Quit,
}

#[derive(Serialize)]
struct DepartmentView {
    name: String,
    label: String,
    people_count: usize,
    score: u64,
}

#[derive(Serialize)]
struct UiState {
    tick: u64,
    paused: bool,
    date: String,
    population: usize,
    walking: usize,
    departments: Vec<DepartmentView>,
    markers: Vec<MarkerView>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 12u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config_path = args.windows(2).find(|w| w[0] == "--config").map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };

    if !ipc_mode {
        println!("Virtual Office — office-runner");
        println!("  seed:        {seed}");
        println!("  ticks:       {ticks}");
        println!("  config:      {}", config_path.unwrap_or("(built-in)"));
        println!("  departments: {}", config.office.departments.len());
        println!();
    }

    let mut sim = OfficeSim::new(config.office.clone(), seed)
        .context("Department layout rejected")?;
    let mut stage = Stage::new(&mut sim);
    for dept in &config.initial_hires {
        sim.hire(dept).with_context(|| format!("Initial hire into {dept}"))?;
    }
    stage.sync(&mut sim)?;

    if ipc_mode {
        run_ipc_loop(&mut sim, &mut stage, &config)?;
    } else {
        run_batch(&mut sim, &mut stage, ticks)?;
        print_summary(&sim, &stage)?;
    }
    sim.stop()?;
    Ok(())
}

fn run_batch(sim: &mut OfficeSim, stage: &mut Stage, ticks: u64) -> Result<()> {
    let period = sim.config().transfer_interval_ms;
    for _ in 0..ticks {
        stage.run_for(sim, period)?;
    }
    Ok(())
}

fn run_ipc_loop(sim: &mut OfficeSim, stage: &mut Stage, config: &RunnerConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd = match parse_command(&buffer) {
            Ok(c) => c,
            Err(e) => {
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };
        if matches!(cmd, IpcCommand::Quit) {
            break;
        }

        match handle_command(sim, stage, config, cmd) {
            Ok(()) => {
                let state = build_ui_state(sim, stage)?;
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            Err(e) => {
                log::warn!("command failed: {e:#}");
                writeln!(stdout, "{}", serde_json::json!({ "error": format!("{e:#}") }))?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<IpcCommand, serde_json::Error> {
    serde_json::from_str(line).map_err(|e| {
        log::warn!("ipc: bad command: {e}");
        e
    })
}

fn handle_command(
    sim: &mut OfficeSim,
    stage: &mut Stage,
    config: &RunnerConfig,
    cmd: IpcCommand,
) -> Result<()> {
    let office_cmd = match cmd {
        IpcCommand::GetState | IpcCommand::Quit => return Ok(()),
        IpcCommand::Hire { department } => OfficeCommand::Hire {
            department: department.unwrap_or_else(|| config.hire_department.clone()),
        },
        IpcCommand::Action { id } => {
            let action = config
                .action(&id)
                .with_context(|| format!("Unknown action '{id}'"))?;
            OfficeCommand::Boost { department: action.department.clone(), amount: action.amount }
        }
        IpcCommand::Boost { department, amount } => OfficeCommand::Boost { department, amount },
        IpcCommand::Tick { count } => {
            for _ in 0..count {
                sim.tick()?;
            }
            stage.sync(sim)?;
            return Ok(());
        }
        IpcCommand::Advance { ms } => {
            stage.run_for(sim, ms)?;
            return Ok(());
        }
        IpcCommand::Pause => OfficeCommand::Pause,
        IpcCommand::Resume => OfficeCommand::Resume,
        IpcCommand::SetSpeed { speed } => OfficeCommand::SetSpeed { speed },
    };

    match sim.apply(office_cmd)? {
        CommandOutcome::Hired(id) => log::info!("ipc: hired {}", id.short()),
        CommandOutcome::Boosted(score) => log::debug!("ipc: boosted to {score}"),
        CommandOutcome::Transferred(_) | CommandOutcome::Clock => {}
    }
    stage.sync(sim)?;
    Ok(())
}

fn build_ui_state(sim: &OfficeSim, stage: &Stage) -> Result<UiState> {
    let snapshot = sim.snapshot();
    let departments = snapshot
        .departments
        .iter()
        .map(|d| -> Result<DepartmentView> {
            let display = sim.display_state(&d.name)?;
            Ok(DepartmentView {
                name: d.name.clone(),
                label: display.to_string(),
                people_count: display.people_count,
                score: display.score,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(UiState {
        tick: snapshot.tick,
        paused: snapshot.clock.paused,
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        population: snapshot.population,
        walking: stage.walking(),
        departments,
        markers: stage.markers(),
    })
}

fn print_summary(sim: &OfficeSim, stage: &Stage) -> Result<()> {
    let snapshot = sim.snapshot();
    let transfers = sim.transfer_stats().map(|t| t.transfers_requested).unwrap_or(0);

    println!("=== RUN SUMMARY ===");
    println!("  final tick:  {}", snapshot.tick);
    println!("  population:  {}", snapshot.population);
    println!("  transfers:   {transfers}");
    println!("  walking:     {}", stage.walking());
    println!("  events:      {}", sim.event_log().len());
    println!();
    println!("=== DEPARTMENTS ===");
    for d in &snapshot.departments {
        let display = sim.display_state(&d.name)?;
        println!("  {:<11} ({:>5.0},{:>5.0})  {display}", d.name, d.anchor.x, d.anchor.z);
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
