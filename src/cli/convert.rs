use super::ui;
use crate::core::RateQuote;
use crate::service::{Conversion, MessageConversion, RateService};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

impl RateQuote {
    pub fn display_as_table(&self, from: &str, to: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("From"),
            ui::header_cell("To"),
            ui::header_cell("Rate"),
        ]);
        table.add_row(vec![
            Cell::new(from.trim().to_uppercase()),
            Cell::new(to.trim().to_uppercase()),
            ui::result_cell(self.rate, 6),
        ]);
        with_provider_footer(&table.to_string(), &self.provider)
    }
}

impl Conversion {
    pub fn display_as_table(&self, from: Option<&str>, to: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Amount"),
            ui::header_cell("Rate"),
            ui::header_cell(&format!("Converted ({})", to.trim().to_uppercase())),
        ]);
        table.add_row(vec![
            ui::number_cell(self.amount, 2),
            ui::number_cell(self.rate, 6),
            ui::result_cell(self.converted, 2),
        ]);

        let title = match from {
            Some(code) => format!("{} → {}", code.trim().to_uppercase(), to.trim().to_uppercase()),
            None => format!("default base → {}", to.trim().to_uppercase()),
        };
        format!(
            "{}\n\n{}",
            ui::style_text(&title, ui::StyleType::Title),
            with_provider_footer(&table.to_string(), &self.provider)
        )
    }
}

impl MessageConversion {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell(&format!("Amount ({})", self.from)),
            ui::header_cell("Rate"),
            ui::header_cell(&format!("Converted ({})", self.to)),
        ]);
        table.add_row(vec![
            ui::number_cell(self.amount, 2),
            ui::number_cell(self.rate, 6),
            ui::result_cell(self.converted, 2),
        ]);
        with_provider_footer(&table.to_string(), &self.provider)
    }
}

fn with_provider_footer(table: &str, provider: &str) -> String {
    format!(
        "{table}\n{}",
        ui::style_text(&format!("Source: {provider}"), ui::StyleType::Subtle)
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run_rate(service: &RateService, from: &str, to: &str, json: bool) -> Result<()> {
    let quote = service.get_rate(from, to).await?;
    if json {
        return print_json(&quote);
    }
    println!("{}", quote.display_as_table(from, to));
    Ok(())
}

pub async fn run_convert(
    service: &RateService,
    amount: f64,
    from: Option<&str>,
    to: &str,
    json: bool,
) -> Result<()> {
    let conversion = service.convert_amount(amount, from, to).await?;
    if json {
        return print_json(&conversion);
    }
    println!("{}", conversion.display_as_table(from, to));
    Ok(())
}

pub async fn run_parse(service: &RateService, message: &str, json: bool) -> Result<()> {
    let conversion = service.parse_and_convert(message).await?;
    if json {
        return print_json(&conversion);
    }
    println!("{}", conversion.display_as_table());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CurrencyCode;

    #[test]
    fn test_rate_table_contains_values() {
        let quote = RateQuote {
            rate: 0.9,
            provider: "api.exchangerate.host".to_string(),
        };
        let output = quote.display_as_table("usd", "eur");
        assert!(output.contains("USD"));
        assert!(output.contains("EUR"));
        assert!(output.contains("0.900000"));
        assert!(output.contains("api.exchangerate.host"));
    }

    #[test]
    fn test_message_conversion_table_contains_values() {
        let conversion = MessageConversion {
            amount: 100.0,
            rate: 0.9,
            converted: 90.0,
            provider: "stub.test".to_string(),
            from: CurrencyCode::normalize("USD").unwrap(),
            to: CurrencyCode::normalize("EUR").unwrap(),
        };
        let output = conversion.display_as_table();
        assert!(output.contains("Amount (USD)"));
        assert!(output.contains("Converted (EUR)"));
        assert!(output.contains("90.00"));
    }

    #[test]
    fn test_conversion_serializes_plain_fields() {
        let conversion = Conversion {
            amount: 10.0,
            rate: 2.0,
            converted: 20.0,
            provider: "stub.test".to_string(),
        };
        let json = serde_json::to_value(&conversion).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": 10.0,
                "rate": 2.0,
                "converted": 20.0,
                "provider": "stub.test"
            })
        );
    }
}
