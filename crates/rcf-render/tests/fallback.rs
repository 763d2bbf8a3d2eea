use std::cell::Cell;

use rcf_core::{ClosedForm, ClosedFormHandle, GeneralTerm, RenderConfig, TermStructure};
use rcf_render::{render, render_closed_form, RendererKind};

/// Handle whose buffers are corrupted in a configurable way.
#[derive(Debug)]
struct Corrupt {
    inner: ClosedForm,
    poly: Vec<f64>,
    base: Vec<f64>,
    notation_calls: Cell<usize>,
}

impl Corrupt {
    fn new(poly: Vec<f64>, base: Vec<f64>) -> Self {
        Self {
            inner: ClosedForm::new(vec![GeneralTerm::real(&[0.0, 1.0], 2.0).unwrap()]),
            poly,
            base,
            notation_calls: Cell::new(0),
        }
    }
}

impl TermStructure for Corrupt {
    fn term_count(&self) -> usize {
        1
    }

    fn term_poly(&self, _index: usize) -> Vec<f64> {
        self.poly.clone()
    }

    fn term_base(&self, _index: usize) -> Vec<f64> {
        self.base.clone()
    }
}

impl ClosedFormHandle for Corrupt {
    fn term_structure(&self) -> Option<&dyn TermStructure> {
        Some(self)
    }

    fn notation(&self, variable: &str) -> String {
        self.notation_calls.set(self.notation_calls.get() + 1);
        self.inner.plain_notation(variable)
    }

    fn term(&self, n: u64) -> [f64; 2] {
        self.inner.term(n)
    }

    fn release(self: Box<Self>) {}
}

/// Handle that only offers its generic notation.
#[derive(Debug)]
struct NotationOnly(&'static str);

impl ClosedFormHandle for NotationOnly {
    fn term_structure(&self) -> Option<&dyn TermStructure> {
        None
    }

    fn notation(&self, _variable: &str) -> String {
        self.0.to_string()
    }

    fn term(&self, _n: u64) -> [f64; 2] {
        [0.0, 0.0]
    }

    fn release(self: Box<Self>) {}
}

#[test]
fn odd_length_polynomial_falls_back() {
    let handle = Corrupt::new(vec![0.0, 0.0, 1.0], vec![2.0, 0.0]);
    let rendered = render_closed_form(&handle, &RenderConfig::default()).unwrap();
    assert_eq!(rendered.renderer, RendererKind::Text);
    assert_eq!(rendered.text, "n \\cdot 2^{n}");
    assert_eq!(handle.notation_calls.get(), 1);
}

#[test]
fn nan_component_falls_back() {
    let handle = Corrupt::new(vec![0.0, 0.0, f64::NAN, 0.0], vec![2.0, 0.0]);
    let rendered = render_closed_form(&handle, &RenderConfig::default()).unwrap();
    assert_eq!(rendered.renderer, RendererKind::Text);
}

#[test]
fn short_base_falls_back() {
    let handle = Corrupt::new(vec![0.0, 0.0, 1.0, 0.0], vec![2.0]);
    let rendered = render_closed_form(&handle, &RenderConfig::default()).unwrap();
    assert_eq!(rendered.renderer, RendererKind::Text);
}

#[test]
fn well_formed_buffers_never_touch_notation() {
    let handle = Corrupt::new(vec![0.0, 0.0, 1.0, 0.0], vec![2.0, 0.0]);
    let rendered = render_closed_form(&handle, &RenderConfig::default()).unwrap();
    assert_eq!(rendered.renderer, RendererKind::Structured);
    assert_eq!(handle.notation_calls.get(), 0);
}

#[test]
fn missing_structure_uses_text_path() {
    let handle = NotationOnly("2n^2 + 0.333333 (1.5)^n");
    assert_eq!(
        render(&handle, 2).unwrap(),
        "2 \\cdot n^{2} + 0.33 \\cdot 1.5^{n}"
    );
}
