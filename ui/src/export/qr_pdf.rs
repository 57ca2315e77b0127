//! Local rendering of the printable QR sheet, used when the backend hands
//! back the QR payload as JSON instead of a finished PDF.

use payloads::responses::QrCodeEntry;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};
use qrcode::{Color as QrColor, QrCode};
use std::io::BufWriter;

use super::ExportError;

// A4 portrait, six bordered cells per page in a 2x3 grid.
const PAGE_W: f64 = 210.0;
const PAGE_H: f64 = 297.0;
const MARGIN: f64 = 15.0;
const COLS: usize = 2;
const ROWS: usize = 3;
const CELL_W: f64 = (PAGE_W - 2.0 * MARGIN) / COLS as f64;
const CELL_H: f64 = (PAGE_H - 2.0 * MARGIN) / ROWS as f64;
const QR_SIZE: f64 = 58.0;
const CODE_FONT_SIZE: f64 = 11.0;

pub fn qr_sheet_pdf(entries: &[QrCodeEntry]) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Voucher QR codes",
        Mm(PAGE_W),
        Mm(PAGE_H),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (page_index, chunk) in entries.chunks(COLS * ROWS).enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page, layer) =
                doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };

        layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        layer.set_outline_thickness(0.6);

        for (i, entry) in chunk.iter().enumerate() {
            let col = i % COLS;
            let row = i / COLS;
            let x0 = MARGIN + col as f64 * CELL_W;
            let y0 = PAGE_H - MARGIN - (row as f64 + 1.0) * CELL_H;
            draw_cell(&layer, &font, entry, x0, y0)?;
        }
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    buffer
        .into_inner()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

fn draw_cell(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    entry: &QrCodeEntry,
    x0: f64,
    y0: f64,
) -> Result<(), ExportError> {
    layer.add_shape(rect(x0 + 2.0, y0 + 2.0, CELL_W - 4.0, CELL_H - 4.0, false));

    // QR payload falls back to the bare code when no URL was delivered.
    let payload = if entry.qr_url.is_empty() {
        entry.code.as_str()
    } else {
        entry.qr_url.as_str()
    };
    let qr = QrCode::new(payload.as_bytes())
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let width = qr.width();
    let module = QR_SIZE / width as f64;
    let qr_x = x0 + (CELL_W - QR_SIZE) / 2.0;
    let qr_top = y0 + CELL_H - 12.0;

    for (index, color) in qr.to_colors().into_iter().enumerate() {
        if color != QrColor::Dark {
            continue;
        }
        let mx = qr_x + (index % width) as f64 * module;
        let my = qr_top - ((index / width) as f64 + 1.0) * module;
        layer.add_shape(rect(mx, my, module, module, true));
    }

    layer.use_text(
        entry.code.clone(),
        CODE_FONT_SIZE,
        Mm(x0 + 8.0),
        Mm(y0 + 7.0),
        font,
    );
    Ok(())
}

fn rect(x: f64, y: f64, w: f64, h: f64, filled: bool) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y)), false),
            (Point::new(Mm(x + w), Mm(y + h)), false),
            (Point::new(Mm(x), Mm(y + h)), false),
        ],
        is_closed: true,
        has_fill: filled,
        has_stroke: !filled,
        is_clipping_path: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str) -> QrCodeEntry {
        QrCodeEntry {
            code: code.to_string(),
            qr_url: format!("https://example.com/qr/{code}"),
        }
    }

    #[test]
    fn produces_a_pdf() {
        let bytes = qr_sheet_pdf(&[entry("VC00001")]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn seven_entries_spill_onto_a_second_page() {
        let entries: Vec<QrCodeEntry> =
            (0..7).map(|i| entry(&format!("VC{i:05}"))).collect();
        let two_pages = qr_sheet_pdf(&entries).unwrap();
        let one_page = qr_sheet_pdf(&entries[..1]).unwrap();
        assert!(two_pages.starts_with(b"%PDF"));
        assert!(two_pages.len() > one_page.len());
    }

    #[test]
    fn empty_qr_url_falls_back_to_the_code() {
        let bytes = qr_sheet_pdf(&[QrCodeEntry {
            code: "VC99999".to_string(),
            qr_url: String::new(),
        }])
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
