//! HTML progress widgets for orders and installation trays.
//!
//! Both widgets are Bootstrap-style striped progress bars. Markup lives in
//! `templates/partials/` and is auto-escaped by askama.
//!
//! One display rule is inverted: a measured 0 % is drawn as a full-width
//! bar (red, since the level is still [`StatusLevel::Empty`]), and so is an
//! empty tray.

use askama::Template;
use tracing::debug;

use crate::error::Result;
use crate::locale::Messages;
use crate::model::{InstallationItem, Order};
use crate::progress::{classify, percent, StatusLevel};

#[derive(Debug, Template)]
#[template(path = "partials/order_progress.html")]
struct OrderProgressTemplate<'a> {
    caption: &'a str,
    rounded: String,
    css_class: &'a str,
    width: String,
}

#[derive(Debug, Template)]
#[template(path = "partials/tray.html")]
struct TrayTemplate<'a> {
    class_key: &'a str,
    barcode: &'a str,
    popover: &'a str,
    color: &'a str,
    width: String,
}

/// Format a percentage for markup: at most two decimals, no trailing
/// zeros, never `-0`.
fn css_number(value: f64) -> String {
    let value = (value * 100.0).round() / 100.0 + 0.0;
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Progress bar for a completed/total pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    percent: f64,
    measured: bool,
}

impl ProgressBar {
    /// Bar for `completed` out of `total`.
    #[must_use]
    pub fn new(completed: f64, total: f64) -> Self {
        Self {
            percent: percent(completed, total),
            measured: true,
        }
    }

    /// Bar for an order, summing all of its items.
    ///
    /// An order whose total is not positive (nothing ordered, negative
    /// quantities, NaN) has no measurable progress: it reads 0 % and is
    /// drawn with zero width.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        let quantities = order.quantities();
        if quantities.is_overfilled() {
            debug!(
                order = %order.code,
                ordered = quantities.total,
                shipped = quantities.completed,
                "order shipped more than it ordered"
            );
        }
        if quantities.total > 0.0 {
            Self {
                percent: quantities.percent(),
                measured: true,
            }
        } else {
            Self {
                percent: 0.0,
                measured: false,
            }
        }
    }

    /// Raw completion percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Percentage shown in the tooltip.
    #[must_use]
    pub fn rounded_percent(&self) -> f64 {
        self.percent.round()
    }

    /// Status level of the raw percentage.
    #[must_use]
    pub fn level(&self) -> StatusLevel {
        classify(self.percent)
    }

    /// Width of the drawn bar, in percent.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn display_percent(&self) -> f64 {
        if self.measured && self.percent == 0.0 {
            100.0
        } else {
            self.percent
        }
    }

    /// Render the bar as an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self, messages: &Messages) -> Result<String> {
        let template = OrderProgressTemplate {
            caption: messages.items_shipped,
            rounded: css_number(self.rounded_percent()),
            css_class: self.level().css_class(),
            width: css_number(self.display_percent()),
        };
        Ok(template.render()?)
    }
}

/// Fill indicator for one installation tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayView {
    tray_type: String,
    status: i64,
    quantity: i64,
    barcode: String,
}

impl TrayView {
    /// View for a tray of the given type, fill level, and capacity.
    #[must_use]
    pub fn new(
        tray_type: impl Into<String>,
        status: i64,
        quantity: i64,
        barcode: impl Into<String>,
    ) -> Self {
        Self {
            tray_type: tray_type.into(),
            status,
            quantity,
            barcode: barcode.into(),
        }
    }

    /// View for a stored tray.
    #[must_use]
    pub fn from_item(item: &InstallationItem) -> Self {
        Self::new(
            item.tray_type.clone(),
            item.status,
            item.quantity,
            item.barcode.clone(),
        )
    }

    /// Check if the tray holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == 0
    }

    /// Width of the drawn bar. An empty tray is drawn full.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent(&self) -> f64 {
        if self.is_empty() {
            100.0
        } else {
            percent(self.status as f64, self.quantity as f64)
        }
    }

    /// Colour token: red when empty, green otherwise.
    #[must_use]
    pub fn color(&self) -> &'static str {
        if self.is_empty() {
            StatusLevel::Empty.color()
        } else {
            StatusLevel::Complete.color()
        }
    }

    /// Fill description, e.g. `"Vuota"` or `"3/12 pz"`.
    #[must_use]
    pub fn label(&self, messages: &Messages) -> String {
        if self.is_empty() {
            messages.tray_empty.to_string()
        } else {
            format!("{}/{} {}", self.status, self.quantity, messages.units)
        }
    }

    /// Popover text: caption followed by [`TrayView::label`].
    #[must_use]
    pub fn popover(&self, messages: &Messages) -> String {
        format!("{}{}", messages.tray_status, self.label(messages))
    }

    /// Barcode printed on the tray.
    #[must_use]
    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Styling key derived from the tray type.
    #[must_use]
    pub fn class_key(&self) -> String {
        self.tray_type.to_lowercase()
    }

    /// Render the tray as an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render(&self, messages: &Messages) -> Result<String> {
        let class_key = self.class_key();
        let popover = self.popover(messages);
        let template = TrayTemplate {
            class_key: &class_key,
            barcode: &self.barcode,
            popover: &popover,
            color: self.color(),
            width: css_number(self.percent()),
        };
        Ok(template.render()?)
    }
}

/// Render the progress bar for an order.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_order_progress(order: &Order, messages: &Messages) -> Result<String> {
    ProgressBar::for_order(order).render(messages)
}

/// Render the fill indicator for a tray.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_tray(item: &InstallationItem, messages: &Messages) -> Result<String> {
    TrayView::from_item(item).render(messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use crate::model::OrderItem;

    fn italian() -> &'static Messages {
        Language::Italian.messages()
    }

    fn english() -> &'static Messages {
        Language::English.messages()
    }

    #[test]
    fn test_progress_bar_half() {
        let bar = ProgressBar::new(50.0, 100.0);
        assert!((bar.percent() - 50.0).abs() < 1e-9);
        assert!((bar.display_percent() - 50.0).abs() < 1e-9);
        assert_eq!(bar.level(), StatusLevel::InProgress);

        let html = bar.render(italian()).unwrap();
        assert!(html.contains("title=\"Articoli evasi: 50%\""));
        assert!(html.contains("active bg-orange"));
        assert!(html.contains("aria-valuenow=\"50\""));
        assert!(html.contains("style=\"width: 50%\""));
    }

    #[test]
    fn test_progress_bar_zero_is_drawn_full_and_red() {
        let bar = ProgressBar::new(0.0, 40.0);
        assert_eq!(bar.level(), StatusLevel::Empty);
        assert!((bar.display_percent() - 100.0).abs() < 1e-9);

        let html = bar.render(italian()).unwrap();
        assert!(html.contains("title=\"Articoli evasi: 0%\""));
        assert!(html.contains("active bg-red"));
        assert!(html.contains("style=\"width: 100%\""));
    }

    #[test]
    fn test_progress_bar_zero_total_counts_as_measured_zero() {
        let bar = ProgressBar::new(0.0, 0.0);
        assert!(bar.percent().abs() < 1e-9);
        assert!((bar.display_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_bar_complete() {
        let html = ProgressBar::new(12.0, 12.0).render(english()).unwrap();
        assert!(html.contains("title=\"Items shipped: 100%\""));
        assert!(html.contains("active bg-green"));
        assert!(html.contains("style=\"width: 100%\""));
    }

    #[test]
    fn test_progress_bar_rounds_title_only() {
        let bar = ProgressBar::new(1.0, 3.0);
        assert!((bar.rounded_percent() - 33.0).abs() < 1e-9);

        let html = bar.render(italian()).unwrap();
        assert!(html.contains("Articoli evasi: 33%"));
        assert!(html.contains("aria-valuenow=\"33.33\""));
        assert!(html.contains("style=\"width: 33.33%\""));
        assert!(!html.contains("33.333"));
    }

    #[test]
    fn test_css_number_trims_precision() {
        assert_eq!(css_number(100.0 / 3.0), "33.33");
        assert_eq!(css_number(12.5), "12.5");
        assert_eq!(css_number(50.0), "50");
        assert_eq!(css_number(0.0), "0");
        assert_eq!(css_number(-0.0), "0");
        assert_eq!(css_number(-0.001), "0");
    }

    #[test]
    fn test_order_progress_sums_items() {
        let order = Order::new("ORD-1", None)
            .with_item(OrderItem::new(30.0, 10.0))
            .with_item(OrderItem::new(10.0, 10.0));

        let bar = ProgressBar::for_order(&order);
        assert!((bar.percent() - 50.0).abs() < 1e-9);
        assert_eq!(bar.level(), StatusLevel::InProgress);
    }

    #[test]
    fn test_order_without_items_draws_zero_width() {
        let order = Order::new("ORD-2", None);
        let bar = ProgressBar::for_order(&order);
        assert!(bar.percent().abs() < 1e-9);
        assert!(bar.display_percent().abs() < 1e-9);

        let html = render_order_progress(&order, italian()).unwrap();
        assert!(html.contains("active bg-red"));
        assert!(html.contains("style=\"width: 0%\""));
    }

    #[test]
    fn test_order_with_negative_total_draws_zero_width() {
        let order = Order::new("ORD-N", None).with_item(OrderItem::new(-10.0, 0.0));
        let bar = ProgressBar::for_order(&order);
        assert!(bar.percent().abs() < 1e-9);
        assert!(bar.display_percent().abs() < 1e-9);

        let html = render_order_progress(&order, italian()).unwrap();
        assert!(html.contains("title=\"Articoli evasi: 0%\""));
        assert!(html.contains("style=\"width: 0%\""));
        assert!(!html.contains("-0"));
    }

    #[test]
    fn test_order_nothing_shipped_draws_full_width() {
        let order = Order::new("ORD-3", None).with_item(OrderItem::new(8.0, 0.0));
        let html = render_order_progress(&order, italian()).unwrap();
        assert!(html.contains("active bg-red"));
        assert!(html.contains("style=\"width: 100%\""));
    }

    #[test]
    fn test_tray_empty_variant() {
        let tray = TrayView::new("Grande", 0, 24, "8001234567890");
        assert!(tray.is_empty());
        assert!((tray.percent() - 100.0).abs() < 1e-9);
        assert_eq!(tray.color(), "bg-red");
        assert_eq!(tray.label(italian()), "Vuota");
        assert_eq!(tray.popover(italian()), "Stato Vaschetta: Vuota");

        let html = tray.render(italian()).unwrap();
        assert!(html.contains("class=\"vaschetta_grande\""));
        assert!(html.contains("title=\"8001234567890\""));
        assert!(html.contains("data-content=\"Stato Vaschetta: Vuota\""));
        assert!(html.contains("active bg-red"));
        assert!(html.contains("style=\"width: 100%\""));
    }

    #[test]
    fn test_tray_empty_variant_ignores_capacity() {
        for capacity in [0, 1, 12, 1_000] {
            let tray = TrayView::new("Piccola", 0, capacity, "BC");
            assert_eq!(tray.label(english()), "Empty");
            assert_eq!(tray.color(), "bg-red");
            assert!((tray.percent() - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_tray_partially_filled() {
        let tray = TrayView::new("Media", 3, 12, "BC-42");
        assert!((tray.percent() - 25.0).abs() < 1e-9);
        assert_eq!(tray.color(), "bg-green");
        assert_eq!(tray.label(italian()), "3/12 pz");
        assert_eq!(tray.label(english()), "3/12 units");

        let html = tray.render(english()).unwrap();
        assert!(html.contains("class=\"vaschetta_media\""));
        assert!(html.contains("active bg-green"));
        assert!(html.contains("aria-valuenow=\"25\""));
        assert!(html.contains("style=\"width: 25%\""));
    }

    #[test]
    fn test_tray_zero_capacity_does_not_divide_by_zero() {
        let tray = TrayView::new("Media", 2, 0, "BC");
        assert!((tray.percent() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_tray_class_key_is_lowercased() {
        assert_eq!(TrayView::new("GRANDE", 1, 2, "x").class_key(), "grande");
    }

    #[test]
    fn test_tray_barcode_is_escaped() {
        let html = TrayView::new("Grande", 1, 2, "<b>\"x\"</b>")
            .render(italian())
            .unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_render_tray_from_item() {
        let item = InstallationItem::new(1, "Grande", 5, 10, "BC-9");
        let html = render_tray(&item, italian()).unwrap();
        assert!(html.contains("style=\"width: 50%\""));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let order = Order::new("ORD-4", None).with_item(OrderItem::new(7.0, 3.0));
        assert_eq!(
            render_order_progress(&order, italian()).unwrap(),
            render_order_progress(&order, italian()).unwrap()
        );

        let item = InstallationItem::new(1, "Grande", 4, 9, "BC");
        assert_eq!(
            render_tray(&item, italian()).unwrap(),
            render_tray(&item, italian()).unwrap()
        );
    }
}
