use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SheetLine {
    pub product: String,
    pub boxes: u32,
    pub bottles: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SheetSection {
    pub category: String,
    pub lines: Vec<SheetLine>,
}

/// Printable content of one order, grouped by category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSheet {
    pub establishment_name: String,
    pub order_number: u32,
    pub date: NaiveDate,
    pub sections: Vec<SheetSection>,
}

impl OrderSheet {
    /// Categories keep their list order; a category with nothing ordered
    /// gets no section.
    pub fn build(establishment_name: &str, order_number: u32, date: NaiveDate, state: &AppState) -> Self {
        let sections = state
            .categories
            .iter()
            .filter_map(|category| {
                let lines: Vec<SheetLine> = state
                    .products
                    .iter()
                    .filter(|p| p.category == category.name && p.has_quantity())
                    .map(|p| SheetLine {
                        product: p.name.clone(),
                        boxes: p.box_quantity,
                        bottles: p.bottle_quantity,
                    })
                    .collect();

                (!lines.is_empty()).then(|| SheetSection {
                    category: category.name.clone(),
                    lines,
                })
            })
            .collect();

        OrderSheet {
            establishment_name: establishment_name.to_string(),
            order_number,
            date,
            sections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn file_name(&self) -> String {
        let name: String = self
            .establishment_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
            .collect();
        format!("{}-{}-Order{}.txt", name, self.date.format("%Y-%m-%d"), self.order_number)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", self.establishment_name);
        let _ = writeln!(
            out,
            "Order #{} - {}",
            self.order_number,
            self.date.format("%Y-%m-%d")
        );

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.category);
            let _ = writeln!(out, "{}", "-".repeat(section.category.chars().count()));
            for line in &section.lines {
                let _ = writeln!(out, "  {}", line.product);
                if line.boxes > 0 {
                    let _ = writeln!(out, "    Box: {}", line.boxes);
                }
                if line.bottles > 0 {
                    let _ = writeln!(out, "    Bottle: {}", line.bottles);
                }
            }
        }

        out
    }
}
