use vulpis_core::{Bounds, Color, Description, FontMetrics, MonospaceFonts};
use vulpis_layout::{FlowLayout, LayoutOptions, LayoutSolver};
use vulpis_render::*;
use vulpis_tree::{NodeTree, Reconciler};

fn fonts() -> MonospaceFonts {
    let mut fonts = MonospaceFonts::new();
    fonts.insert(
        10.0,
        FontMetrics {
            line_height: 20.0,
            ascent: 16.0,
        },
    );
    fonts
}

fn frame(desc: &Description, fonts: &MonospaceFonts) -> RenderCommandList {
    let mut tree = NodeTree::new();
    Reconciler::new().reconcile_root(&mut tree, desc);
    FlowLayout::new().solve(&mut tree, &LayoutOptions::new(200.0, 100.0), fonts);
    CommandGenerator::new().generate(&tree, fonts)
}

#[test]
fn wrapped_text_inside_padded_card() {
    let fonts = fonts();
    let desc = Description::column()
        .style("padding", 10)
        .style("backgroundColor", "#000000")
        .child(
            Description::text("hello brave new world")
                .font(vulpis_core::FontId(1))
                .style("width", 100)
                .style("overflow", "visible"),
        );

    let list = frame(&desc, &fonts);
    let white = Color::WHITE;
    assert_eq!(
        list.commands,
        vec![
            RenderCommand::FillRect {
                bounds: Bounds::new(0.0, 0.0, 200.0, 100.0),
                color: Color::BLACK,
            },
            RenderCommand::PushClip {
                bounds: Bounds::new(0.0, 0.0, 200.0, 100.0),
            },
            RenderCommand::DrawText {
                text: "hello".into(),
                font: vulpis_core::FontId(1),
                x: 10.0,
                y: 26.0,
                color: white,
            },
            RenderCommand::DrawText {
                text: "brave new".into(),
                font: vulpis_core::FontId(1),
                x: 10.0,
                y: 46.0,
                color: white,
            },
            RenderCommand::DrawText {
                text: "world".into(),
                font: vulpis_core::FontId(1),
                x: 10.0,
                y: 66.0,
                color: white,
            },
            RenderCommand::PopClip,
        ]
    );
}

#[test]
fn nested_clips_stay_balanced() {
    let fonts = fonts();
    let leaf = || Description::rect().style("width", 10).style("height", 10);
    let desc = Description::row()
        .child(Description::column().child(leaf()).child(leaf()))
        .child(Description::column().style("overflow", "visible").child(leaf()));

    let list = frame(&desc, &fonts);
    assert!(list.clips_balanced());
    let pushes = list
        .iter()
        .filter(|c| matches!(c, RenderCommand::PushClip { .. }))
        .count();
    // root, first column, three leaves
    assert_eq!(pushes, 5);
}

#[test]
fn recording_renderer_receives_frame() {
    let fonts = fonts();
    let list = frame(&Description::rect().style("backgroundColor", "#00FF00"), &fonts);

    let mut renderer = RecordingRenderer::new();
    renderer.begin_frame().unwrap();
    renderer.submit(&list).unwrap();
    renderer.end_frame().unwrap();

    assert_eq!(renderer.last_frame(), Some(&list));
}
