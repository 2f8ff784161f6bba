use escapist_core::{mandelbrot_escape, Complex, FractalMode, SimulationParams, Viewport};
use escapist_render::{builtin_gradients, draw_frame, render, simulate, Gradient, RenderBuffer};

/// The reference scene: start -2 - i, width 3.5, a 500 px wide canvas whose
/// height follows the view.
fn reference_scene(resolution: u32, accuracy: u32) -> (Viewport, SimulationParams, RenderBuffer) {
    let canvas_w = 500.0;
    let canvas_h = 500.0 * (2.0 / 3.5);
    let viewport =
        Viewport::with_aspect(Complex::new(-2.0, -1.0), 3.5, canvas_w, canvas_h).unwrap();
    let params = SimulationParams::new(resolution, accuracy).unwrap();
    let buffer = RenderBuffer::new(canvas_w as u32, canvas_h as u32).unwrap();
    (viewport, params, buffer)
}

#[test]
fn end_to_end_mandelbrot_render() {
    let (viewport, params, mut buffer) = reference_scene(500, 200);

    let timing = draw_frame(
        &params,
        &viewport,
        FractalMode::Mandelbrot,
        &Gradient::default(),
        &mut buffer,
    )
    .unwrap();

    assert_eq!(timing.stats.painted + timing.stats.interior, 500 * 500);
    let has_color = buffer
        .pixels
        .chunks_exact(4)
        .any(|px| px[0] > 0 || px[1] > 0 || px[2] > 0);
    let has_black = buffer.pixels.chunks_exact(4).any(|px| px == [0, 0, 0, 255]);
    assert!(has_color, "rendered image should contain colored pixels");
    assert!(has_black, "the set itself should stay black");
}

#[test]
fn reference_scene_is_mirror_symmetric() {
    let (viewport, params, _) = reference_scene(120, 200);
    let frame = simulate(&params, &viewport, FractalMode::Mandelbrot).unwrap();

    assert!(frame.samples().count() > 0);
    for s in frame.samples() {
        assert_eq!(
            mandelbrot_escape(s.point.conj(), params.accuracy).escape_index(),
            Some(s.iterations),
            "asymmetry at {}",
            s.point
        );
    }
}

#[test]
fn grid_sizing_for_unit_view() {
    let viewport = Viewport::new(Complex::new(-1.0, -0.5), 1.0, 1.0).unwrap();
    let params = SimulationParams::new(10, 50).unwrap();
    let frame = simulate(&params, &viewport, FractalMode::Mandelbrot).unwrap();

    assert_eq!(frame.rows().len(), 10);
    for row in frame.rows() {
        assert_eq!(row.len(), 10);
    }
    assert!(frame.samples().all(|s| s.iterations < 50));
}

#[test]
fn end_to_end_julia_render() {
    let viewport = Viewport::new(Complex::new(-1.6, -1.0), 3.2, 2.0).unwrap();
    let params = SimulationParams::new(100, 150).unwrap();
    let mode = FractalMode::Julia {
        c: Complex::new(-1.0, 0.0),
    };
    let mut buffer = RenderBuffer::new(160, 100).unwrap();

    let timing = draw_frame(&params, &viewport, mode, &Gradient::default(), &mut buffer).unwrap();

    assert_eq!(timing.stats.painted + timing.stats.interior, 100 * 100);
    assert!(timing.stats.painted > 0);
    assert!(timing.stats.interior > 0);
}

#[test]
fn render_determinism() {
    let (viewport, params, _) = reference_scene(80, 100);

    let f1 = simulate(&params, &viewport, FractalMode::Mandelbrot).unwrap();
    let f2 = simulate(&params, &viewport, FractalMode::Mandelbrot).unwrap();

    assert_eq!(f1, f2, "simulations must be deterministic");
}

#[test]
fn gradient_switch_without_resimulating() {
    let (viewport, params, mut buf_a) = reference_scene(100, 100);
    let mut buf_b = buf_a.clone();
    let frame = simulate(&params, &viewport, FractalMode::Mandelbrot).unwrap();

    let gradients = builtin_gradients();
    render(&frame, &gradients[0], &mut buf_a).unwrap();
    render(&frame, &gradients[1], &mut buf_b).unwrap();

    assert_eq!(buf_a.pixels.len(), buf_b.pixels.len());
    assert_ne!(
        buf_a.pixels, buf_b.pixels,
        "different gradients should produce different images"
    );
}
