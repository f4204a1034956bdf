//! CLI logic for the Lodestar scenario runner.
//!
//! Loads a scene from a TOML file, applies one engine operation —
//! alignment, distribution, or a snapped drag — and writes the updated
//! scene back out.

mod args;
mod config;
mod error;

pub use args::{Args, Operation, OrientationArg, ReferenceArg};
pub use error::CliError;

use std::fs;

use log::info;

use lodestar::drag::{DragController, Modifiers, PointerEvent, Viewport};
use lodestar::snap::Snapper;
use lodestar_core::geometry::{Point, Size};
use lodestar_core::scene::{ElementId, Scene};

/// Run the Lodestar scenario runner.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Scene or configuration parse errors
/// - Missing operation parameters or unknown element ids
/// - Gesture sequencing violations surfaced by the engine
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing scene"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let content = fs::read_to_string(&args.input)?;
    let mut scene: Scene = toml::from_str(&content).map_err(|source| CliError::Parse {
        path: args.input.clone(),
        source,
    })?;

    let selection = resolve_selection(&scene, &args.select)?;

    match args.op {
        Operation::Align => {
            let reference = args.reference.ok_or(CliError::MissingOption {
                operation: "align",
                option: "reference",
            })?;
            let deltas = lodestar::align(&scene, &selection, reference.into());
            for (&id, &delta) in &deltas {
                scene.translate_element(id, delta);
            }
            info!(moved = deltas.len(); "Applied alignment");
        }
        Operation::Distribute => {
            let orientation = args.orientation.ok_or(CliError::MissingOption {
                operation: "distribute",
                option: "orientation",
            })?;
            let deltas = lodestar::distribute(&scene, &selection, orientation.into());
            for (&id, &delta) in &deltas {
                scene.translate_element(id, delta);
            }
            info!(moved = deltas.len(); "Applied distribution");
        }
        Operation::SnapDrag => {
            let raw = args.element.ok_or(CliError::MissingOption {
                operation: "snap-drag",
                option: "element",
            })?;
            let element = ElementId::new(raw);
            let center = scene
                .element(element)
                .ok_or(CliError::UnknownElement(raw))?
                .rect()
                .center();

            let mut drag_selection = selection.clone();
            if !drag_selection.contains(&element) {
                drag_selection.insert(0, element);
            }

            // A viewport large enough that auto-pan never engages; the
            // runner plays the gesture in one move.
            let viewport = Viewport::new(Point::default(), 1.0, Size::new(1e6, 1e6));
            let mut controller = DragController::new(
                Snapper::from_settings(app_config.snap()),
                app_config.pan().clone(),
            );
            controller.set_start_threshold(0.0);

            let press = PointerEvent::new(center, center, Modifiers::none());
            controller.pointer_down(&scene, &viewport, press, &drag_selection)?;
            let target = center.add(Point::new(args.dx, args.dy));
            let drag = PointerEvent::new(target, target, Modifiers::none());
            controller.pointer_move(&mut scene, drag)?;
            let commands = controller.pointer_up(&mut scene)?;
            info!(commands_len = commands.len(); "Drag committed");
        }
    }

    let rendered = toml::to_string(&scene)?;
    fs::write(&args.output, rendered)?;

    info!(output_file = args.output; "Scene written");
    Ok(())
}

/// Resolves the `--select` list, defaulting to every movable, non-wire
/// element in scene order.
fn resolve_selection(scene: &Scene, ids: &[u64]) -> Result<Vec<ElementId>, CliError> {
    if ids.is_empty() {
        return Ok(scene
            .elements()
            .filter(|e| e.is_movable() && !e.is_wire())
            .map(|e| e.id())
            .collect());
    }
    ids.iter()
        .map(|&raw| {
            let id = ElementId::new(raw);
            scene
                .element(id)
                .map(|_| id)
                .ok_or(CliError::UnknownElement(raw))
        })
        .collect()
}
