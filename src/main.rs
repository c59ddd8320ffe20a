use anyhow::Result;
use knockabout::{
    ClickEvent, Document, ElementId, EngineConfig, ManualScheduler, MemoryDocument, NodeSpec,
    SyncEngine, Viewport,
};
use log::info;
use std::time::Duration;

/// Pace of the simulated display (~60 Hz)
const REFRESH_INTERVAL: Duration = Duration::from_micros(16_667);

/// Frames to run before and after the click
const FRAMES_PER_PHASE: usize = 90;

/// Render a small markdown preview: a heading, three task lines and a list
fn render_preview(doc: &mut MemoryDocument, editor: ElementId) -> Result<Vec<ElementId>> {
    let missing = || anyhow::anyhow!("editor node left the document");

    let preview = doc
        .append(editor, NodeSpec::container().class("euiText euiMarkdownFormat"))
        .ok_or_else(missing)?;

    let mut leaves = vec![doc
        .append(preview, NodeSpec::leaf(220.0, 36.0).margin(16.0, 16.0))
        .ok_or_else(missing)?];

    for width in [90.0, 90.0, 130.0] {
        leaves.push(
            doc.append(preview, NodeSpec::leaf(width, 20.0).margin(16.0, 8.0))
                .ok_or_else(missing)?,
        );
    }

    let list = doc
        .append(preview, NodeSpec::container().margin(0.0, 12.0))
        .ok_or_else(missing)?;
    for width in [48.0, 20.0, 86.0, 42.0] {
        leaves.push(
            doc.append(list, NodeSpec::leaf(width, 20.0).margin(40.0, 6.0))
                .ok_or_else(missing)?,
        );
    }

    Ok(leaves)
}

fn run_frames(
    engine: &mut SyncEngine,
    doc: &mut MemoryDocument,
    scheduler: &mut ManualScheduler,
    max: usize,
) -> usize {
    let mut frames = 0;
    while frames < max && scheduler.take() {
        std::thread::sleep(REFRESH_INTERVAL);
        engine.on_frame(doc, scheduler);
        frames += 1;
    }
    frames
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting knockabout demo...");

    let mut doc = MemoryDocument::new(Viewport::new(1280.0, 720.0));
    let mut scheduler = ManualScheduler::new();
    let mut engine = SyncEngine::new(EngineConfig::default())?;

    let root = doc.root();
    let editor = doc
        .append(root, NodeSpec::container())
        .ok_or_else(|| anyhow::anyhow!("document root is missing"))?;

    // The editor switches to preview mode
    let leaves = render_preview(&mut doc, editor)?;
    engine.handle_mutation(&mut doc, &mut scheduler)?;
    run_frames(&mut engine, &mut doc, &mut scheduler, FRAMES_PER_PHASE);

    // Knock the heading around by clicking near its left end
    let heading = leaves[0];
    if let Some(transform) = doc.transform(heading) {
        let click = ClickEvent::new(transform.translate.x + 4.0, transform.translate.y + 18.0);
        if let Some(disposition) = engine.click(heading, click) {
            info!("Click on heading handled: {:?}", disposition);
        }
    }
    run_frames(&mut engine, &mut doc, &mut scheduler, FRAMES_PER_PHASE);

    for leaf in &leaves {
        if let Some(transform) = doc.transform(*leaf) {
            info!("{} -> {}", leaf, transform.to_css());
        }
    }

    // Back to edit mode: the preview goes away and the loop winds down
    let preview = doc
        .find_by_class(&engine.config().preview_class)
        .ok_or_else(|| anyhow::anyhow!("preview vanished early"))?;
    doc.remove(preview);
    engine.handle_mutation(&mut doc, &mut scheduler)?;
    let trailing = run_frames(&mut engine, &mut doc, &mut scheduler, FRAMES_PER_PHASE);

    info!(
        "Finished in state {:?} after {} trailing frame(s): {:?}",
        engine.state(),
        trailing,
        engine.stats()
    );

    Ok(())
}
