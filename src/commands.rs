use std::io::Write;
use std::time::Duration;

use ringbar_core::ControlState;
use ringbar_types::RadiusSource;

use crate::context::{HeadlessWidget, ReplContext, default_config_path};
use crate::error::CommandError;

pub fn spawn(ctx: &mut ReplContext, rotation: bool) {
    let widget = ctx.spawn(rotation);
    let rotate = if widget.features().rotation { "yes" } else { "no" };
    println!("spawned widget {} (rotate control: {})", widget.index(), rotate);
}

pub fn set_value(ctx: &ReplContext, index: usize, raw: &str) -> Result<(), CommandError> {
    let widget = ctx.widget(index)?;
    widget.set_value(raw);
    println!("widget {} value = {}", index, widget.get_value());
    Ok(())
}

pub fn animate(ctx: &ReplContext, index: usize, on: bool) -> Result<(), CommandError> {
    let widget = ctx.widget(index)?;
    widget.toggle_animation(on);
    print_row_for(widget);
    Ok(())
}

pub fn rotate(ctx: &ReplContext, index: usize, on: bool) -> Result<(), CommandError> {
    let widget = ctx.widget(index)?;
    widget.toggle_rotation(on);
    if on && !widget.state().is_rotated() {
        println!("rotation ignored: widget {} is not animating", index);
    }
    print_row_for(widget);
    Ok(())
}

pub fn hide(ctx: &ReplContext, index: usize, on: bool) -> Result<(), CommandError> {
    let widget = ctx.widget(index)?;
    widget.toggle_hiding(on);
    print_row_for(widget);
    Ok(())
}

pub fn reset(ctx: &ReplContext, index: usize) -> Result<(), CommandError> {
    let widget = ctx.widget(index)?;
    widget.reset();
    print_row_for(widget);
    Ok(())
}

pub fn advance(ctx: &ReplContext, input: &str) -> Result<(), CommandError> {
    let by = parse_duration(input)?;
    ctx.advance(by);
    println!("t = {}ms", ctx.scheduler.now().as_millis());
    Ok(())
}

pub fn show(ctx: &ReplContext, index: Option<usize>) -> Result<(), CommandError> {
    let selected: Vec<&HeadlessWidget> = match index {
        Some(index) => vec![ctx.widget(index)?],
        None => ctx.widgets.iter().collect(),
    };

    if selected.is_empty() {
        println!("No widgets; use `spawn` to add one");
        return Ok(());
    }

    print_header();
    for widget in selected {
        print_row(widget);
    }
    Ok(())
}

pub fn show_config(ctx: &ReplContext) {
    let config = &ctx.config;
    match &ctx.config_path {
        Some(path) => println!("config file: {}", path.display()),
        None => match default_config_path() {
            Some(path) => println!("config file: none (looked for {})", path.display()),
            None => println!("config file: none"),
        },
    }
    println!("marker:         {}", config.marker);
    match config.widget.radius {
        RadiusSource::Fixed { radius } => println!("radius:         {radius} (fixed)"),
        RadiusSource::Computed { fallback } => {
            println!("radius:         computed, fallback {fallback}")
        }
    }
    println!("rotate control: {}", config.widget.rotate_control);
    println!("tick interval:  {}ms", config.widget.tick_interval_ms);
}

pub fn exit() -> Result<(), String> {
    writeln!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

/// Parse `250ms`, `2s` or a bare number of milliseconds.
pub fn parse_duration(input: &str) -> Result<Duration, CommandError> {
    let invalid = || CommandError::InvalidDuration {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    let (number, scale) = if let Some(ms) = trimmed.strip_suffix("ms") {
        (ms, 1)
    } else if let Some(secs) = trimmed.strip_suffix('s') {
        (secs, 1000)
    } else {
        (trimmed, 1)
    };
    let amount: u64 = number.trim().parse().map_err(|_| invalid())?;
    amount
        .checked_mul(scale)
        .map(Duration::from_millis)
        .ok_or_else(invalid)
}

fn print_header() {
    println!(
        "{:<4} {:>5}  {:<8} {:<8} {:<8} {:>9}  Enabled",
        "Idx", "Value", "Animated", "Rotated", "Hidden", "Arc"
    );
    println!("{}", "-".repeat(72));
}

fn print_row_for(widget: &HeadlessWidget) {
    print_header();
    print_row(widget);
}

fn print_row(widget: &HeadlessWidget) {
    let state = widget.state();
    let arc = widget.inspect_view(|view| view.arc_offset);
    println!(
        "{:<4} {:>5}  {:<8} {:<8} {:<8} {:>9.2}  {}",
        state.index(),
        state.value(),
        yes_no(state.is_animated()),
        yes_no(state.is_rotated()),
        yes_no(state.is_hidden()),
        arc,
        enabled_controls(widget.controls()),
    );
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn enabled_controls(controls: ControlState) -> String {
    let mut names = vec![];
    if controls.value_enabled {
        names.push("value");
    }
    if controls.animate_enabled {
        names.push("animate");
    }
    if controls.rotate_enabled {
        names.push("rotate");
    }
    names.push("hide");
    names.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbar_types::PageConfig;

    fn ctx_with(count: usize) -> ReplContext {
        let mut ctx = ReplContext::new(PageConfig::default(), None);
        for _ in 0..count {
            ctx.spawn(true);
        }
        ctx
    }

    #[test]
    fn duration_forms() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("40").unwrap(), Duration::from_millis(40));
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("-5ms").is_err());
    }

    #[test]
    fn unknown_widget_is_reported() {
        let ctx = ctx_with(1);
        let err = set_value(&ctx, 3, "10").unwrap_err();
        assert!(matches!(err, CommandError::UnknownWidget { index: 3, count: 1 }));
    }

    #[test]
    fn spawned_widgets_share_one_clock() {
        let ctx = ctx_with(2);
        animate(&ctx, 0, true).unwrap();
        animate(&ctx, 1, true).unwrap();
        assert_eq!(ctx.scheduler.live_tasks(), 2);

        advance(&ctx, "2s").unwrap();
        for widget in &ctx.widgets {
            assert_eq!(widget.inspect_view(|view| view.draws), 100);
        }
    }

    #[test]
    fn reduced_spawn_never_rotates() {
        let mut ctx = ctx_with(0);
        ctx.spawn(false);
        animate(&ctx, 0, true).unwrap();
        rotate(&ctx, 0, true).unwrap();
        assert!(!ctx.widgets[0].state().is_rotated());
    }

    #[test]
    fn enabled_controls_lists_hide_last() {
        let controls = ControlState {
            value_enabled: true,
            animate_enabled: true,
            rotate_enabled: false,
        };
        assert_eq!(enabled_controls(controls), "value,animate,hide");
    }
}
