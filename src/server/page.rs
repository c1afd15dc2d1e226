//! HTML rendering for the calculator form.

use crate::calc::InterestResult;
use crate::config::CalculatorConfig;

/// What the form should show below the inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Empty,
    Result(InterestResult),
    Error(String),
}

/// Values echoed back into the inputs after a submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    pub principal: String,
    pub rate: String,
    pub time: String,
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn money(config: &CalculatorConfig, amount: f64) -> String {
    format!("{}{:.2}", escape_html(&config.currency_symbol), amount)
}

fn input(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"    <label for="{name}">{label}</label>
    <input type="text" inputmode="decimal" id="{name}" name="{name}" value="{value}" required>
"#,
        name = name,
        label = label,
        value = escape_html(value),
    )
}

fn outcome_html(config: &CalculatorConfig, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Empty => String::new(),
        Outcome::Result(result) => format!(
            r#"  <section class="result">
    <p>Simple interest: <strong id="simple-interest">{}</strong></p>
    <p>Total amount: <strong id="total-amount">{}</strong></p>
  </section>
"#,
            money(config, result.simple_interest),
            money(config, result.total_amount),
        ),
        Outcome::Error(message) => format!(
            "  <p class=\"error\" role=\"alert\">{}</p>\n",
            escape_html(message)
        ),
    }
}

/// Render the full page.
pub fn render(config: &CalculatorConfig, values: &FormValues, outcome: &Outcome) -> String {
    let title = escape_html(&config.title);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <style>
    body {{ font-family: sans-serif; max-width: 28rem; margin: 2rem auto; }}
    label, input {{ display: block; margin-bottom: 0.5rem; }}
    .error {{ color: #b00020; }}
  </style>
</head>
<body>
  <h1>{title}</h1>
  <form method="post" action="/">
{principal}{rate}{time}    <button type="submit">Calculate</button>
  </form>
{outcome}</body>
</html>
"#,
        title = title,
        principal = input("principal", "Principal", &values.principal),
        rate = input("rate", "Rate (% per year)", &values.rate),
        time = input("time", "Time (years)", &values.time),
        outcome = outcome_html(config, outcome),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("1000.50"), "1000.50");
    }

    #[test]
    fn test_empty_form() {
        let html = render(&CalculatorConfig::default(), &FormValues::default(), &Outcome::Empty);
        assert!(html.contains("<h1>Simple Interest Calculator</h1>"));
        assert!(html.contains(r#"name="principal""#));
        assert!(html.contains(r#"name="rate""#));
        assert!(html.contains(r#"name="time""#));
        assert!(!html.contains("class=\"result\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_result_uses_currency_symbol() {
        let config = CalculatorConfig {
            currency_symbol: "$".to_string(),
            ..CalculatorConfig::default()
        };
        let outcome = Outcome::Result(InterestResult {
            simple_interest: 100.0,
            total_amount: 1100.0,
        });
        let html = render(&config, &FormValues::default(), &outcome);
        assert!(html.contains(r#"<strong id="simple-interest">$100.00</strong>"#));
        assert!(html.contains(r#"<strong id="total-amount">$1100.00</strong>"#));
    }

    #[test]
    fn test_error_and_values_are_escaped() {
        let values = FormValues {
            principal: "<script>".to_string(),
            rate: "5".to_string(),
            time: "2".to_string(),
        };
        let outcome = Outcome::Error("Invalid numeric input for principal".to_string());
        let html = render(&CalculatorConfig::default(), &values, &outcome);

        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"value="&lt;script&gt;""#));
        assert!(html.contains("Invalid numeric input for principal"));
    }
}
