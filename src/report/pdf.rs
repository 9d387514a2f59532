use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::report::{FIX_FIRST_HEADING, GAPS_HEADING, ReportDocument, ReportError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 12.7;
const PT_TO_MM: f32 = 0.3528;
const BODY_PT: f32 = 11.0;
const WRAP_CHARS: usize = 88;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

// Writes top-down; `y` is the baseline of the next line, in mm from the page bottom.
struct Cursor<'a> {
    layer: &'a PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn text(&mut self, text: &str, size_pt: f32, font: &IndirectFontRef, x_mm: f32) {
        self.y -= size_pt * PT_TO_MM;
        self.layer
            .use_text(pdf_safe(text), size_pt, Mm(x_mm), Mm(self.y), font);
        self.y -= size_pt * PT_TO_MM * 0.45;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn bullet(&mut self, text: &str, font: &IndirectFontRef) {
        let lines = wrap(text, WRAP_CHARS);
        for (idx, line) in lines.iter().enumerate() {
            let prefix = if idx == 0 { "- " } else { "  " };
            self.text(&format!("{prefix}{line}"), BODY_PT, font, MARGIN_MM);
        }
        self.gap(1.4);
    }
}

pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (pdf, page, layer) =
        PdfDocument::new(doc.title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Report");
    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(e.to_string()))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(e.to_string()))?,
    };
    let layer = pdf.get_page(page).get_layer(layer);

    let ink = Color::Rgb(Rgb::new(0.043, 0.059, 0.078, None));
    let muted = Color::Rgb(Rgb::new(0.294, 0.333, 0.388, None));
    let faint = Color::Rgb(Rgb::new(0.420, 0.447, 0.502, None));

    let mut cursor = Cursor {
        layer: &layer,
        y: PAGE_HEIGHT_MM - MARGIN_MM,
    };

    layer.set_fill_color(ink.clone());
    cursor.text(doc.title, 20.0, &fonts.bold, MARGIN_MM);
    cursor.gap(1.0);
    layer.set_fill_color(muted.clone());
    cursor.text(doc.subtitle, 12.0, &fonts.regular, MARGIN_MM);
    cursor.gap(5.0);

    let box_top = cursor.y;
    let inner_x = MARGIN_MM + 5.0;
    cursor.gap(5.0);
    layer.set_fill_color(ink.clone());
    cursor.text(&format!("{} / 100", doc.score), 36.0, &fonts.bold, inner_x);
    cursor.text(doc.verdict, 14.0, &fonts.bold, inner_x);
    layer.set_fill_color(muted.clone());
    cursor.text(doc.microcopy, BODY_PT, &fonts.regular, inner_x);
    cursor.gap(3.0);
    let box_bottom = cursor.y;

    layer.set_outline_color(Color::Rgb(Rgb::new(0.067, 0.094, 0.153, None)));
    layer.set_outline_thickness(1.0);
    layer.add_line(rectangle(
        MARGIN_MM,
        box_bottom,
        PAGE_WIDTH_MM - MARGIN_MM,
        box_top,
    ));
    cursor.gap(8.0);

    layer.set_fill_color(ink.clone());
    cursor.text(GAPS_HEADING, 13.0, &fonts.bold, MARGIN_MM);
    cursor.gap(1.0);
    for gap in &doc.gaps {
        cursor.bullet(gap, &fonts.regular);
    }
    cursor.gap(5.0);

    cursor.text(FIX_FIRST_HEADING, 13.0, &fonts.bold, MARGIN_MM);
    cursor.gap(1.0);
    for item in &doc.fix_first {
        cursor.bullet(item, &fonts.regular);
    }

    layer.set_fill_color(faint);
    layer.use_text(
        pdf_safe(doc.footer),
        9.0,
        Mm(MARGIN_MM),
        Mm(8.5),
        &fonts.regular,
    );

    let bytes = pdf
        .save_to_bytes()
        .map_err(|e| ReportError::Render(e.to_string()))?;
    if bytes.is_empty() {
        return Err(ReportError::EmptyOutput);
    }
    Ok(bytes)
}

fn rectangle(left: f32, bottom: f32, right: f32, top: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(left), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(left), Mm(top)), false),
        ],
        is_closed: true,
    }
}

pub fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2022}' => '-',
            '\u{2026}' => '.',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/pdf.rs"]
mod tests;
