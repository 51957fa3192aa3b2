//! Page layout of a [`MenuDocument`].
//!
//! Layout is a single vertical cursor. Every block measures itself first; when
//! it does not fit above the footer zone, a new page is started and the
//! cursor goes back to the top margin.

use crate::{
    MenuDocument,
    canvas::{Canvas, Rgb},
    document::{CategorySection, DocumentLine},
    metrics::{Font, wrap_text},
};

const MARGIN: f64 = 20.0;
/// Space kept free at the bottom of every page.
const FOOTER_ZONE: f64 = 25.0;
/// Distance of the footer baseline from the bottom edge.
const FOOTER_OFFSET: f64 = 12.0;
const NAME_WIDTH: f64 = 120.0;

const ADD_ON: Rgb = Rgb(180, 83, 9);
const DETAIL: Rgb = Rgb(80, 80, 80);
const NOTE: Rgb = Rgb(120, 120, 120);
const TOTAL_BOX: Rgb = Rgb(240, 240, 240);

pub struct DocumentFormatter<'c, C: Canvas> {
    canvas: &'c mut C,
    y: f64,
    width: f64,
    height: f64,
}

/// Wrapped text of one item, measured before drawing.
struct ItemBlock {
    name: Vec<String>,
    description: Vec<String>,
    dietary: Option<String>,
    note: Vec<String>,
}

impl ItemBlock {
    fn height(&self, add_on: bool) -> f64 {
        let mut height = self.name.len() as f64 * 5.0 + 2.0 + 8.0;
        if !self.description.is_empty() {
            height += self.description.len() as f64 * 4.0 + 3.0;
        }
        if self.dietary.is_some() {
            height += 5.0;
        }
        if !self.note.is_empty() {
            height += self.note.len() as f64 * 4.0 + 3.0;
        }
        if add_on {
            height += 5.0;
        }
        height
    }
}

impl<'c, C: Canvas> DocumentFormatter<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        let (width, height) = canvas.page_size();
        Self {
            canvas,
            y: MARGIN,
            width,
            height,
        }
    }

    /// Lays the whole document out and returns the number of pages used.
    pub fn render(mut self, doc: &MenuDocument) -> usize {
        self.header(doc);
        if let Some(customer) = &doc.customer {
            self.event_details(&customer.details());
        }
        if !doc.sections.is_empty() {
            self.heading("Selected Menu Items");
            for section in &doc.sections {
                self.section(section, doc);
            }
            self.y += 10.0;
        }
        self.totals(doc);
        self.terms(&doc.terms);
        self.footer(doc);
        self.canvas.page_count()
    }

    fn bottom(&self) -> f64 {
        self.height - FOOTER_ZONE
    }

    fn content_width(&self) -> f64 {
        self.width - 2.0 * MARGIN
    }

    fn ensure_space(&mut self, needed: f64) {
        if self.y + needed > self.bottom() && self.y > MARGIN {
            self.canvas.add_page();
            self.y = MARGIN;
            tracing::debug!(page = self.canvas.page_count(), needed, "page break");
        }
    }

    fn style(&mut self, font: Font, size: f64, color: Rgb) {
        self.canvas.set_font(font, size);
        self.canvas.set_text_color(color);
    }

    fn wrap(&mut self, text: &str, font: Font, size: f64, width: f64) -> Vec<String> {
        self.canvas.set_font(font, size);
        let canvas = &*self.canvas;
        wrap_text(text, width, |s| canvas.text_width(s))
    }

    fn centered(&mut self, text: &str, y: f64) {
        let x = (self.width - self.canvas.text_width(text)) / 2.0;
        self.canvas.text(text, x, y);
    }

    fn right_aligned(&mut self, text: &str, right: f64, y: f64) {
        let x = right - self.canvas.text_width(text);
        self.canvas.text(text, x, y);
    }

    fn divider(&mut self) {
        let y = self.y;
        self.canvas
            .line((MARGIN, y), (self.width - MARGIN, y), Rgb::RULE, 0.5);
    }

    fn header(&mut self, doc: &MenuDocument) {
        let business = &doc.business;

        self.style(Font::Bold, 24.0, Rgb::INK);
        self.centered(&business.name, self.y);
        self.y += 10.0;

        if !business.tagline.trim().is_empty() {
            self.style(Font::Regular, 12.0, Rgb::MUTED);
            self.centered(&business.tagline, self.y);
        }
        self.y += 15.0;

        self.style(Font::Regular, 10.0, DETAIL);
        for line in business.contact_lines() {
            self.centered(&line, self.y);
            self.y += 6.0;
        }

        self.y += 10.0;
        self.divider();
        self.y += 15.0;
    }

    fn event_details(&mut self, details: &[(&str, String)]) {
        if details.is_empty() {
            return;
        }
        let box_height = details.len() as f64 * 6.0 + 10.0;
        self.ensure_space(12.0 + box_height + 25.0);

        self.style(Font::Bold, 14.0, Rgb::INK);
        self.canvas.text("Event Details", MARGIN, self.y);
        self.y += 12.0;

        self.canvas
            .fill_rect(MARGIN, self.y - 5.0, self.content_width(), box_height, Rgb::SHADE);
        self.style(Font::Regular, 10.0, Rgb::BODY);
        for (label, value) in details {
            self.canvas
                .text(&format!("{label}: {value}"), MARGIN + 5.0, self.y);
            self.y += 6.0;
        }
        self.y += 15.0;
        self.divider();
        self.y += 15.0;
    }

    fn heading(&mut self, title: &str) {
        self.ensure_space(30.0);
        self.style(Font::Bold, 16.0, Rgb::INK);
        self.canvas.text(title, MARGIN, self.y);
        self.y += 15.0;
    }

    fn section(&mut self, section: &CategorySection, doc: &MenuDocument) {
        let blocks: Vec<ItemBlock> = section.lines.iter().map(|l| self.measure(l)).collect();

        let title_height = if section.description.is_empty() { 10.0 } else { 15.0 };
        let first_item = blocks
            .first()
            .zip(section.lines.first())
            .map_or(0.0, |(b, l)| b.height(l.is_add_on()) + 8.0);
        self.ensure_space(title_height + first_item);

        self.style(Font::Bold, 13.0, Rgb::INK);
        self.canvas.text(&section.title, MARGIN, self.y);
        self.y += 5.0;
        if !section.description.is_empty() {
            self.style(Font::Italic, 9.0, Rgb::MUTED);
            self.canvas.text(&section.description, MARGIN, self.y);
            self.y += 5.0;
        }
        self.y += 5.0;

        for (index, (line, block)) in section.lines.iter().zip(&blocks).enumerate() {
            self.item(index, line, block, doc);
        }
    }

    fn measure(&mut self, line: &DocumentLine) -> ItemBlock {
        let text_width = self.content_width() - 20.0;
        let description = if line.description.trim().is_empty() {
            Vec::new()
        } else {
            self.wrap(&line.description, Font::Regular, 9.0, text_width)
        };
        let note = match &line.note {
            Some(note) if !note.trim().is_empty() => {
                self.wrap(&format!("Note: {note}"), Font::Italic, 8.0, text_width)
            }
            _ => Vec::new(),
        };
        ItemBlock {
            name: self.wrap(&line.name, Font::Bold, 12.0, NAME_WIDTH),
            description,
            dietary: (!line.dietary.is_empty())
                .then(|| format!("Dietary: {}", line.dietary.join(", "))),
            note,
        }
    }

    fn item(&mut self, index: usize, line: &DocumentLine, block: &ItemBlock, doc: &MenuDocument) {
        let height = block.height(line.is_add_on());
        self.ensure_space(height + 8.0);

        if index % 2 == 0 {
            self.canvas
                .fill_rect(MARGIN, self.y - 5.0, self.content_width(), height + 2.0, Rgb::SHADE);
        }

        let right = self.width - MARGIN - 5.0;
        let price = format!("{} x {}", line.unit_price.format(doc.currency), line.quantity);
        let total = format!("= {}", line.line_total().format(doc.currency));

        self.style(Font::Bold, 12.0, Rgb::INK);
        self.canvas
            .text(&format!("{}.", index + 1), MARGIN + 5.0, self.y);
        for (i, name) in block.name.iter().enumerate() {
            self.canvas
                .text(name, MARGIN + 15.0, self.y + i as f64 * 5.0);
        }

        self.style(Font::Bold, 11.0, Rgb::INK);
        let total_width = self.canvas.text_width(&total);
        self.style(Font::Regular, 11.0, Rgb::BODY);
        let price_width = self.canvas.text_width(&price);
        self.canvas
            .text(&price, right - price_width.max(total_width), self.y);
        self.y += block.name.len() as f64 * 5.0 + 2.0;

        self.style(Font::Bold, 11.0, Rgb::INK);
        self.right_aligned(&total, right, self.y);
        self.y += 8.0;

        if !block.description.is_empty() {
            self.style(Font::Regular, 9.0, DETAIL);
            self.lines(&block.description, 4.0);
            self.y += 3.0;
        }
        if let Some(dietary) = &block.dietary {
            self.style(Font::Regular, 8.0, Rgb::MUTED);
            self.canvas.text(dietary, MARGIN + 15.0, self.y);
            self.y += 5.0;
        }
        if !block.note.is_empty() {
            self.style(Font::Italic, 8.0, NOTE);
            self.lines(&block.note, 4.0);
            self.y += 3.0;
        }
        if line.is_add_on() {
            self.style(Font::Bold, 8.0, ADD_ON);
            let marker = format!("[Add-on] x{} beyond the package allowance", line.add_on_quantity);
            self.canvas.text(&marker, MARGIN + 15.0, self.y);
            self.y += 5.0;
        }
        self.y += 8.0;
    }

    fn lines(&mut self, lines: &[String], leading: f64) {
        for line in lines {
            self.canvas.text(line, MARGIN + 15.0, self.y);
            self.y += leading;
        }
    }

    fn totals(&mut self, doc: &MenuDocument) {
        let package_height = if doc.package.is_some() { 14.0 } else { 0.0 };
        self.ensure_space(15.0 + package_height + 25.0);

        self.canvas
            .line((MARGIN, self.y), (self.width - MARGIN, self.y), Rgb::MUTED, 0.5);
        self.y += 15.0;

        let label_x = self.width - MARGIN - 75.0;
        if let Some(package) = doc.package {
            self.style(Font::Regular, 11.0, Rgb::BODY);
            for (label, amount) in [("Package (included):", package.base), ("Add-ons:", package.add_on)] {
                self.canvas.text(label, label_x - 40.0, self.y);
                self.right_aligned(&amount.format(doc.currency), self.width - MARGIN - 5.0, self.y);
                self.y += 7.0;
            }
            self.y += 5.0;
        }

        self.canvas
            .fill_rect(label_x - 5.0, self.y - 8.0, 75.0, 20.0, TOTAL_BOX);
        self.style(Font::Bold, 16.0, Rgb::INK);
        self.canvas.text("Grand Total:", label_x, self.y);
        self.canvas
            .text(&doc.grand_total().format(doc.currency), label_x, self.y + 8.0);
        self.y += 25.0;
    }

    fn terms(&mut self, terms: &[String]) {
        if terms.is_empty() {
            return;
        }
        let width = self.content_width() - 10.0;
        let wrapped: Vec<Vec<String>> = terms
            .iter()
            .map(|term| self.wrap(&format!("* {term}"), Font::Regular, 9.0, width))
            .collect();

        let first = wrapped.first().map_or(0.0, |lines| lines.len() as f64 * 5.0 + 2.0);
        self.ensure_space(8.0 + first);
        self.style(Font::Bold, 10.0, DETAIL);
        self.canvas.text("Terms & Conditions:", MARGIN, self.y);
        self.y += 8.0;

        self.style(Font::Regular, 9.0, Rgb::MUTED);
        for lines in wrapped {
            self.ensure_space(lines.len() as f64 * 5.0 + 2.0);
            // A page break resets nothing but the cursor; the style is kept.
            for line in &lines {
                self.canvas.text(line, MARGIN + 5.0, self.y);
                self.y += 5.0;
            }
            self.y += 2.0;
        }
    }

    fn footer(&mut self, doc: &MenuDocument) {
        self.style(Font::Regular, 8.0, Rgb::FAINT);
        let text = format!(
            "Generated on {} | {}",
            doc.generated_on.format("%Y-%m-%d"),
            doc.business.name
        );
        self.centered(&text, self.height - FOOTER_OFFSET);
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::{Catalog, CustomerInfo, MenuCategory, MenuItem, MoneyCents, SelectionStore};

    use super::*;
    use crate::{BusinessInfo, DrawOp, RecordingCanvas};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: Some("Anita Rao".to_string()),
            email: Some("anita@example.com".to_string()),
            phone: Some("+91 98480 22338".to_string()),
            event_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            event_time: Some("7:30 PM".to_string()),
            event_type: Some("Wedding reception".to_string()),
            guest_count: Some(280),
        }
    }

    fn render(doc: &MenuDocument) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::a4();
        DocumentFormatter::new(&mut canvas).render(doc);
        canvas
    }

    #[test]
    fn empty_selection_fits_one_page() {
        let doc = MenuDocument::from_selections(BusinessInfo::default(), &[], &Catalog::default())
            .customer(customer())
            .generated_on(date());
        let canvas = render(&doc);

        assert_eq!(canvas.page_count(), 1);
        let text = canvas.all_text();
        assert_eq!(text[0], "ARK Events");
        assert!(text.contains(&"Event Details"));
        assert!(text.contains(&"Guest Count: 280"));
        assert!(text.contains(&"Grand Total:"));
        assert!(text.contains(&"Rs. 0.00"));
        assert!(!text.contains(&"Selected Menu Items"));
        assert_eq!(
            text.last().copied(),
            Some("Generated on 2026-10-16 | ARK Events")
        );
    }

    #[test]
    fn long_selection_spills_onto_more_pages() {
        let category = MenuCategory::new("mains", "Main Course", 1);
        let items: Vec<MenuItem> = (0..40)
            .map(|i| {
                MenuItem::new(format!("m{i}"), format!("Dish {i}"), "mains", MoneyCents::new(100_00))
                    .description("Slow cooked with whole spices, finished with cream and served hot")
            })
            .collect();
        let catalog = Catalog::new(vec![category], items.clone());
        let mut store = SelectionStore::new();
        for item in items {
            store.add_item(item, 2);
        }

        let doc = MenuDocument::from_selections(BusinessInfo::default(), store.selections(), &catalog)
            .generated_on(date());
        let canvas = render(&doc);
        assert!(canvas.page_count() > 2);

        let (_, height) = canvas.page_size();
        let last_page = canvas.page_count() - 1;
        for (page, ops) in canvas.pages().iter().enumerate() {
            for op in ops {
                if let DrawOp::Text { text, y, .. } = op {
                    let is_footer = page == last_page && text.starts_with("Generated on");
                    assert!(is_footer || *y <= height - FOOTER_ZONE, "{text} at {y}");
                }
            }
        }
        let text = canvas.all_text();
        assert!(text.contains(&"= Rs. 200.00"));
        assert!(text.contains(&"Rs. 8,000.00"));
    }

    #[test]
    fn item_lines_show_price_total_and_markers() {
        let item = MenuItem::new("tikka", "Paneer Tikka", "starters", MoneyCents::new(150_00))
            .description("Char grilled cottage cheese")
            .dietary(engine::DietaryTag::Vegetarian)
            .note("Contains dairy");
        let catalog = Catalog::new(vec![MenuCategory::new("starters", "Starters", 1)], vec![item.clone()]);
        let mut store = engine::LimitedSelectionStore::new(vec![engine::CategoryLimit::new(
            "starters", 1, "Starters",
        )]);
        store.add_item(item.clone());
        store.add_item(item);

        let doc = MenuDocument::from_limited(BusinessInfo::default(), store.selections(), &catalog)
            .generated_on(date());
        let canvas = render(&doc);
        let text = canvas.all_text();

        for expected in [
            "Starters",
            "1.",
            "Paneer Tikka",
            "Rs. 150.00 x 2",
            "= Rs. 300.00",
            "Char grilled cottage cheese",
            "Dietary: Vegetarian",
            "Note: Contains dairy",
            "[Add-on] x1 beyond the package allowance",
            "Package (included):",
            "Add-ons:",
        ] {
            assert!(text.contains(&expected), "missing {expected}");
        }
    }
}
