use clap::Args;
use focusplan_core::{Config, Plan, SessionConfig};
use serde::Serialize;

#[derive(Args)]
pub struct PlanArgs {
    /// Total focus time in minutes
    minutes: String,
    /// Split into chunks with breaks in between
    #[arg(long)]
    breaks: bool,
}

#[derive(Serialize)]
struct PlanOutput {
    focus_minutes: u32,
    /// Whether breaks apply after the short-session rule.
    breaks: bool,
    #[serde(flatten)]
    plan: Plan,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let session = SessionConfig::parse(&args.minutes, args.breaks)?;
    let policy = Config::load()?.policy()?;

    if args.breaks && !session.effective_break(&policy) {
        eprintln!(
            "note: breaks need more than {} minutes of focus",
            policy.base_focus_minutes()
        );
    }

    let output = PlanOutput {
        focus_minutes: session.focus_minutes,
        breaks: session.effective_break(&policy),
        plan: session.plan(&policy),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
