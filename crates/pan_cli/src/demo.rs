//! Script runner
//!
//! Builds a pager on the simulated surface from a [`PanToml`], plays a
//! gesture script against it and writes every delegate and lifecycle
//! callback as text or JSON lines.

use std::io::Write;

use anyhow::{Context, Result};
use pan_harness::prelude::*;
use pan_harness::FRAME;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::PanToml;
use crate::script::{DragAmount, Step};

/// Finger movement per simulated move event (points)
const DRAG_STEP: f32 = 10.0;

/// Output options
#[derive(Debug, Default, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub show_changes: bool,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    step: &'a str,
    #[serde(flatten)]
    event: &'a Recorded,
}

#[derive(Serialize)]
struct JsonSummary {
    index: usize,
    count: usize,
}

fn describe(event: &Recorded) -> String {
    match *event {
        Recorded::StartPanning { from } => format!("start-panning  from {from}"),
        Recorded::ChangePanning { from, to, progress } => {
            format!("change-panning {from} -> {to} ({progress:.2})")
        }
        Recorded::StopPanning { from, to } => format!("stop-panning   {from} -> {to}"),
        Recorded::Paging { from, to } => format!("paging         {from} -> {to}"),
        Recorded::Lifecycle { page, event } => format!("page {page}: {event:?}"),
    }
}

fn emit(out: &mut dyn Write, step: &str, events: &[Recorded], output: Output) -> Result<()> {
    if !output.json {
        writeln!(out, "> {step}")?;
    }
    for event in events {
        if event.is_change() && !output.show_changes {
            continue;
        }
        if output.json {
            writeln!(out, "{}", serde_json::to_string(&JsonLine { step, event })?)?;
        } else {
            writeln!(out, "  {}", describe(event))?;
        }
    }
    Ok(())
}

fn drag_distance(amount: DragAmount, extent: f32) -> f32 {
    match amount {
        DragAmount::NextPage => extent,
        DragAmount::PreviousPage => -extent,
        DragAmount::Points(points) => points,
    }
}

/// Play `steps` and report the final index
pub fn run_script(
    config: &PanToml,
    steps: &[Step],
    output: Output,
    out: &mut dyn Write,
) -> Result<usize> {
    let log = EventLog::new();
    let lifecycle = config.demo.lifecycle;
    let pages = labelled_pages(config.demo.pages, &log, |index| lifecycle.includes(index));
    let mut pager = build_pager(config.surface, config.pager, pages, config.demo.effect, &log);
    pager.run_until_idle().context("pager did not come to rest")?;
    emit(out, "init", &log.take(), output)?;

    for step in steps {
        let label = step.to_string();
        debug!(step = %label, "running step");
        match *step {
            Step::Drag(amount) => {
                let distance = drag_distance(amount, pager.surface().extent());
                let moves = ((distance.abs() / DRAG_STEP).ceil() as usize).max(1);
                pager.drag(distance, moves);
            }
            Step::Release { velocity } => pager.release(velocity),
            Step::Swipe(pages) => pager
                .swipe(pages)
                .with_context(|| format!("'{label}' did not settle"))?,
            Step::Jump { index, animated } => {
                if let Err(err) = pager.jump_to(index, animated) {
                    warn!(%err, "jump rejected");
                }
            }
            Step::Wait(seconds) => {
                let frames = (seconds / FRAME).round() as usize;
                for _ in 0..frames {
                    pager.step_frame();
                }
            }
            Step::Settle => {
                pager
                    .run_until_idle()
                    .with_context(|| format!("'{label}' did not settle"))?;
            }
        }
        emit(out, &label, &log.take(), output)?;
    }

    let summary = JsonSummary {
        index: pager.index(),
        count: pager.count(),
    };
    if output.json {
        writeln!(out, "{}", serde_json::to_string(&summary)?)?;
    } else {
        writeln!(out, "index {} of {}", summary.index, summary.count)?;
    }
    Ok(summary.index)
}
