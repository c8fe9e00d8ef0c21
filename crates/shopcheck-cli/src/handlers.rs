//! Handlers for `list` and `verify`

use crate::commands::{ListArgs, PriceArgs, SortArgs};
use crate::error::{CliError, CliResult};
use serde::Serialize;
use shopcheck::{scenarios, verify_sorted, CartSnapshot, LineItem, MockDriver, Money, PriceReport, SortMode, TaxRate};

/// A registered scenario as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Scenarios matching the filter, in run order
#[must_use]
pub fn list_scenarios(filter: Option<&str>) -> Vec<ScenarioInfo> {
    // Names and descriptions are the same for every driver.
    scenarios::select::<MockDriver>(filter)
        .into_iter()
        .map(|s| ScenarioInfo {
            name: s.name,
            description: s.description,
        })
        .collect()
}

/// Render the `list` output
pub fn render_list(args: &ListArgs) -> CliResult<String> {
    let found = list_scenarios(args.filter.as_deref());
    if args.json {
        return serde_json::to_string_pretty(&found).map_err(|e| CliError::Shop(e.into()));
    }
    let width = found.iter().map(|s| s.name.len()).max().unwrap_or(0);
    Ok(found
        .iter()
        .map(|s| format!("{:width$}  {}", s.name, s.description))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Split `"name=$1.00"` into its parts; a bare price gets a numbered name
fn line_item(index: usize, text: &str) -> CliResult<LineItem> {
    let (name, price) = match text.rsplit_once('=') {
        Some((name, price)) => (name.trim().to_string(), price),
        None => (format!("item {}", index + 1), text),
    };
    Ok(LineItem::parse(name, price)?)
}

/// Parse the `verify price` arguments and run the three checks
pub fn check_prices(args: &PriceArgs) -> CliResult<PriceReport> {
    let items = args
        .items
        .iter()
        .enumerate()
        .map(|(i, text)| line_item(i, text))
        .collect::<CliResult<Vec<_>>>()?;
    let rate: TaxRate = args.tax_rate.parse()?;
    let snapshot = CartSnapshot {
        items,
        subtotal: Money::parse(&args.subtotal)?,
        tax: Money::parse(&args.tax)?,
        total: Money::parse(&args.total)?,
    };
    tracing::debug!(items = snapshot.items.len(), %rate, "verifying prices");
    Ok(snapshot.verify(rate))
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "ok"
    } else {
        "MISMATCH"
    }
}

/// Render a price report, one line per check
#[must_use]
pub fn render_price_report(report: &PriceReport) -> String {
    [
        format!(
            "subtotal  displayed {:>10}  computed {:>10}  {}",
            report.displayed.subtotal.to_string(),
            report.computed_subtotal.to_string(),
            verdict(report.subtotal_ok)
        ),
        format!(
            "tax       displayed {:>10}  computed {:>10}  {}",
            report.displayed.tax.to_string(),
            report.computed_tax.to_string(),
            verdict(report.tax_ok)
        ),
        format!(
            "total     displayed {:>10}  computed {:>10}  {}",
            report.displayed.total.to_string(),
            report.computed_total.to_string(),
            verdict(report.total_ok)
        ),
    ]
    .join("\n")
}

/// `verify price`: the report, or an error carrying it on any mismatch
pub fn verify_price(args: &PriceArgs) -> CliResult<String> {
    let report = check_prices(args)?;
    let text = render_price_report(&report);
    report
        .into_result()
        .map_err(|e| CliError::verification(format!("{e}\n{text}")))?;
    Ok(text)
}

/// `verify sort`: check the values against the named option
pub fn verify_sort(args: &SortArgs) -> CliResult<String> {
    let mode: SortMode = args.mode.parse()?;
    if verify_sorted(&args.values, mode)? {
        Ok(format!("{} values are sorted by {mode}", args.values.len()))
    } else {
        Err(CliError::verification(format!("values are not sorted by {mode}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn price_args(items: &[&str], subtotal: &str, tax: &str, total: &str) -> PriceArgs {
        PriceArgs {
            items: items.iter().map(ToString::to_string).collect(),
            subtotal: subtotal.to_string(),
            tax: tax.to_string(),
            total: total.to_string(),
            tax_rate: "0.08".to_string(),
        }
    }

    fn sort_args(mode: &str, values: &[&str]) -> SortArgs {
        SortArgs {
            mode: mode.to_string(),
            values: values.iter().map(ToString::to_string).collect(),
        }
    }

    mod list_tests {
        use super::*;

        #[test]
        fn test_list_all_in_order() {
            let all = list_scenarios(None);
            assert_eq!(all.len(), 14);
            assert_eq!(all[0].name, "home_page_ui");
            assert_eq!(all.last().unwrap().name, "full_purchase");
        }

        #[test]
        fn test_list_filter() {
            let names: Vec<_> = list_scenarios(Some("sort")).into_iter().map(|s| s.name).collect();
            assert_eq!(names, vec!["sort_by_option", "sort_response_time"]);
        }

        #[test]
        fn test_render_json() {
            let text = render_list(&ListArgs {
                filter: Some("full".to_string()),
                json: true,
            })
            .unwrap();
            let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(parsed[0]["name"], "full_purchase");
        }

        #[test]
        fn test_render_text_aligns_descriptions() {
            let text = render_list(&ListArgs {
                filter: Some("login".to_string()),
                json: false,
            })
            .unwrap();
            assert!(text.lines().all(|l| l.starts_with("login")));
            assert_eq!(text.lines().count(), 3);
        }
    }

    mod price_tests {
        use super::*;

        #[test]
        fn test_backpack_and_bike_light() {
            let args = price_args(
                &["Sauce Labs Backpack=$29.99", "$9.99"],
                "Item total: $39.98",
                "Tax: $3.20",
                "Total: $43.18",
            );
            let report = check_prices(&args).unwrap();
            assert!(report.all_ok());
            assert_eq!(report.displayed.items[0].name, "Sauce Labs Backpack");
            assert_eq!(report.displayed.items[1].name, "item 2");
            assert!(verify_price(&args).is_ok());
        }

        #[test]
        fn test_wrong_tax_is_verification_error() {
            let args = price_args(&["$29.99", "$9.99"], "$39.98", "$3.19", "$43.17");
            let err = verify_price(&args).unwrap_err();
            assert!(matches!(err, CliError::Verification { .. }));
            assert!(err.to_string().contains("tax"));
        }

        #[test]
        fn test_unreadable_price_is_shop_error() {
            let args = price_args(&["twelve dollars"], "$0.00", "$0.00", "$0.00");
            assert!(matches!(check_prices(&args), Err(CliError::Shop(_))));
        }

        #[test]
        fn test_report_marks_mismatch() {
            let args = price_args(&["$10.00"], "$10.01", "$0.80", "$10.81");
            let text = render_price_report(&check_prices(&args).unwrap());
            assert!(text.lines().next().unwrap().ends_with("MISMATCH"));
            assert!(text.lines().nth(2).unwrap().ends_with("ok"));
        }
    }

    mod sort_tests {
        use super::*;

        #[test]
        fn test_sorted_names() {
            let args = sort_args(
                "Name (A to Z)",
                &["Sauce Labs Backpack", "Sauce Labs Bike Light", "Sauce Labs Bolt T-Shirt"],
            );
            assert!(verify_sort(&args).is_ok());
        }

        #[test]
        fn test_wrong_direction() {
            let args = sort_args("hilo", &["$7.99", "$9.99", "$15.99"]);
            assert!(matches!(verify_sort(&args), Err(CliError::Verification { .. })));
        }

        #[test]
        fn test_unknown_option() {
            let args = sort_args("Unknown Option", &["a"]);
            assert!(matches!(
                verify_sort(&args),
                Err(CliError::Shop(shopcheck::ShopError::UnsupportedSortMode { .. }))
            ));
        }
    }
}
