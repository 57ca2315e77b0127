use payloads::responses;
use serde::Serialize;

use super::ExportError;

/// Exports carry a BOM so spreadsheet tools pick up UTF-8.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Encode rows as CSV: header row from the struct's field names,
/// comma-separated, fields quoted as needed.
pub fn to_csv_bytes<T: Serialize>(rows: &[T]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + data.len());
    bytes.extend_from_slice(&UTF8_BOM);
    bytes.extend(data);
    Ok(bytes)
}

/// Flat row shape for the voucher table export. Nested/optional fields are
/// rendered to plain text first.
#[derive(Debug, Serialize)]
struct VoucherRow {
    code: String,
    customer_id: String,
    campaign: String,
    discount_amount: String,
    status: String,
    issued_at: String,
    expires_at: String,
    used_at: String,
    order_id: String,
}

pub fn vouchers_to_csv(
    vouchers: &[responses::Voucher],
) -> Result<Vec<u8>, ExportError> {
    let rows: Vec<VoucherRow> = vouchers
        .iter()
        .map(|voucher| VoucherRow {
            code: voucher.code.clone(),
            customer_id: voucher
                .customer_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            campaign: voucher.campaign.clone().unwrap_or_default(),
            discount_amount: voucher.discount_amount.to_string(),
            status: voucher.status.to_string(),
            issued_at: voucher.issued_at.to_string(),
            expires_at: voucher
                .expires_at
                .map(|t| t.to_string())
                .unwrap_or_default(),
            used_at: voucher
                .used_at
                .map(|t| t.to_string())
                .unwrap_or_default(),
            order_id: voucher.order_id.clone().unwrap_or_default(),
        })
        .collect();
    to_csv_bytes(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        a: i32,
        b: String,
    }

    #[test]
    fn bom_header_and_quoting() {
        let rows = vec![Sample {
            a: 1,
            b: "x,y".to_string(),
        }];
        let bytes = to_csv_bytes(&rows).unwrap();

        assert_eq!(&bytes[..3], &UTF8_BOM);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.starts_with("a,b\n"));
        assert!(text.contains("1,\"x,y\""));
    }

    #[test]
    fn quotes_inside_fields_are_escaped() {
        let rows = vec![Sample {
            a: 2,
            b: r#"say "hi""#.to_string(),
        }];
        let bytes = to_csv_bytes(&rows).unwrap();
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.contains(r#""say ""hi""""#));
    }
}
