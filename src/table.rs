use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

use crate::model::{ResponseSlice, SearchResponse, TripData};

/// Turns the API's `"USD612.10"` style amounts into `"$612.10"`.
pub fn format_price(amount: &str) -> String {
    if amount.is_empty() {
        return "—".to_string();
    }
    let split = amount
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(amount.len());
    let (currency, value) = amount.split_at(split);
    if value.is_empty() {
        return amount.to_string();
    }
    match currency {
        "USD" => format!("${value}"),
        "EUR" => format!("€{value}"),
        "GBP" => format!("£{value}"),
        "JPY" | "CNY" => format!("¥{value}"),
        "KRW" => format!("₩{value}"),
        "INR" => format!("₹{value}"),
        "" => value.to_string(),
        _ => format!("{value} {currency}"),
    }
}

pub fn format_duration(minutes: u32) -> String {
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

/// `"2026-04-01T08:30-05:00"` to `"2026-04-01 08:30"`.
pub fn format_time(t: &str) -> String {
    let trimmed = t.get(..16).unwrap_or(t);
    trimmed.replacen('T', " ", 1)
}

fn airport_label(data: &TripData, code: &str) -> String {
    match data.airport(code) {
        Some(a) if !a.name.is_empty() => format!("{code} ({})", a.name),
        _ => code.to_string(),
    }
}

fn push_slice_rows(table: &mut Table, option: &str, price: &str, slice: &ResponseSlice, data: &TripData) {
    for (i, segment) in slice.segment.iter().enumerate() {
        let route: Vec<String> = segment
            .leg
            .iter()
            .map(|l| format!("{} → {}", airport_label(data, &l.origin), airport_label(data, &l.destination)))
            .collect();
        let depart = segment.leg.first().map(|l| format_time(&l.departure_time)).unwrap_or_default();
        let arrive = segment.leg.last().map(|l| format_time(&l.arrival_time)).unwrap_or_default();
        let carrier = data
            .carrier(&segment.flight.carrier)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| segment.flight.carrier.clone());

        let (option_cell, price_cell) = if i == 0 {
            (option.to_string(), price.to_string())
        } else {
            (String::new(), String::new())
        };

        table.add_row(vec![
            option_cell,
            format!("{} {}", segment.flight, carrier),
            route.join("\n"),
            depart,
            arrive,
            format_duration(segment.duration),
            format!("{} / {}", segment.cabin, segment.booking_code),
            price_cell,
        ]);
    }
}

pub fn render(response: &SearchResponse) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Option", "Flight", "Route", "Depart", "Arrive", "Duration", "Cabin", "Price",
        ]);

    let data = &response.trips.data;

    if response.trips.trip_option.is_empty() {
        let price = format_price(&response.trips.sale_total);
        for slice in &response.slice {
            push_slice_rows(&mut table, "1", &price, slice, data);
        }
    } else {
        for (n, option) in response.trips.trip_option.iter().enumerate() {
            let price = format_price(&option.sale_total);
            let label = (n + 1).to_string();
            for slice in &option.slice {
                push_slice_rows(&mut table, &label, &price, slice, data);
            }
        }
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_symbols() {
        assert_eq!(format_price("USD612.10"), "$612.10");
        assert_eq!(format_price("EUR99"), "€99");
        assert_eq!(format_price("CHF120.00"), "120.00 CHF");
        assert_eq!(format_price(""), "—");
    }

    #[test]
    fn time_is_trimmed() {
        assert_eq!(format_time("2026-04-01T08:30-05:00"), "2026-04-01 08:30");
        assert_eq!(format_time("08:30"), "08:30");
    }

    #[test]
    fn duration_hours_minutes() {
        assert_eq!(format_duration(375), "6h 15m");
        assert_eq!(format_duration(45), "0h 45m");
    }
}
