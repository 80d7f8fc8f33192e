use domain::session::WeighingSession;
use domain::settings::FarmSettings;

use crate::printer::builder::ReceiptBuilder;

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Render a saved session into the nota layout as raw ESC/POS bytes.
pub fn render_receipt(session: &WeighingSession, settings: &FarmSettings) -> Vec<u8> {
    let data = &session.data;

    let mut receipt = ReceiptBuilder::new()
        .initialize()
        .align_center()
        .double_size(true)
        .bold(true)
        .text_line(&settings.farm_name)
        .double_size(false)
        .bold(false)
        .text_line(&settings.farm_address)
        .separator()
        .align_left()
        .text_line(&format!(
            "Tanggal: {} {}",
            format_long_date(&data.date),
            data.time
        ))
        .text_line(&format!("Pembeli: {}", data.buyer))
        .text_line(&format!("Supir  : {}", data.driver))
        .separator()
        .align_center()
        .bold(true)
        .text_line("DETAIL PENIMBANGAN")
        .bold(false)
        .align_left();

    // Two columns of loads, 16 characters each
    for pair in data.items.chunks(2) {
        let left = format!("{}. {} Kg", pair[0].index, format_weight(pair[0].gross_weight));
        let line = match pair.get(1) {
            Some(right) => format!(
                "{:<16}{}. {} Kg",
                left,
                right.index,
                format_weight(right.gross_weight)
            ),
            None => left,
        };
        receipt = receipt.text_line(&line);
    }

    receipt
        .separator()
        .kv("Tot Berat", &format!("{} Kg", format_weight(data.total_net_weight)))
        .kv("Tot Timbang", &data.total_coli.to_string())
        .separator()
        .kv("Harga Dasar", &format_currency(data.base_price))
        .kv("Potongan CN", &format_currency(data.cn_amount))
        .bold(true)
        .kv("Harga Bersih", &format_currency(data.final_price))
        .bold(false)
        .separator()
        .double_size(true)
        .bold(true)
        .text_line(&format!("TOTAL: {}", format_currency(data.total_amount)))
        .double_size(false)
        .bold(false)
        .separator()
        .align_center()
        .bold(true)
        .text_line("*** TERIMA KASIH ***")
        .bold(false)
        .empty_line()
        .feed(3)
        .cut()
        .build()
}

/// Rupiah with dot thousand grouping, no decimals: `Rp 2.500.000`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}Rp {}", sign, group_thousands(rounded.unsigned_abs()))
}

/// Weight with comma decimal, at most two places, trailing zeros dropped:
/// `12,5`, `120`
pub fn format_weight(weight: f64) -> String {
    let rounded = (weight * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        rounded.to_string().replace('.', ",")
    }
}

/// `2024-12-01` as the spoken form `1 Desember 2024`; malformed dates pass
/// through untouched.
fn format_long_date(date: &str) -> String {
    let parts: Vec<&str> = date.splitn(3, '-').collect();
    if let [year, month, day] = parts[..] {
        if let (Ok(d), Ok(m)) = (day.parse::<u32>(), month.parse::<usize>()) {
            if let Some(name) = m.checked_sub(1).and_then(|i| MONTH_NAMES.get(i)) {
                return format!("{d} {name} {year}");
            }
        }
    }
    date.to_string()
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1000;
        value /= 1000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{:03}", group));
    }
    groups.reverse();
    groups.join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(2_500_000.0), "Rp 2.500.000");
        assert_eq!(format_currency(0.0), "Rp 0");
        assert_eq!(format_currency(999.0), "Rp 999");
    }

    #[test]
    fn test_format_weight() {
        assert_eq!(format_weight(12.5), "12,5");
        assert_eq!(format_weight(120.0), "120");
        assert_eq!(format_weight(10.456), "10,46");
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2024-12-01"), "1 Desember 2024");
        assert_eq!(format_long_date("2025-01-17"), "17 Januari 2025");
        assert_eq!(format_long_date("garbage"), "garbage");
    }
}
