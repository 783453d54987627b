//! JSON document specs shared by the scenario tests.
#![allow(dead_code)]

use serde_json::{json, Value};

/// `count` rent ledger rows named `Tenant 1..=count`.
pub fn rent_rows(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| {
            json!({
                "tenant": format!("Tenant {}", i),
                "property": "Riverside Court",
                "unit": format!("B{:02}", i),
                "amount_due": 25000,
                "amount_paid": if i % 4 == 0 { 12500 } else { 25000 },
                "balance": if i % 4 == 0 { 12500 } else { 0 },
                "payment_date": "2025-03-01",
                "status": if i % 4 == 0 { "Partial" } else { "Paid" }
            })
        })
        .collect()
}

/// A catalogued rent collection report whose content is derived from `data`.
pub fn rent_report(rows: usize) -> Value {
    json!({
        "type": "report",
        "content": {
            "reportId": "rent_collection",
            "owner": "Jane O'Neil & Sons",
            "period": "March 2025",
            "summary": "Collections held steady across the portfolio.",
            "includeCharts": false,
            "data": {
                "kpis": {
                    "total_expected": 925000,
                    "total_collected": 832500,
                    "collected_change": 4.2,
                    "tenants_paid": 28
                },
                "table": rent_rows(rows)
            }
        }
    })
}

fn bar_chart(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "type": "bar",
        "title": title,
        "xKey": "month",
        "yKeys": ["amount"],
        "data": [
            { "month": "Jan", "amount": 120000 },
            { "month": "Feb", "amount": 135000 },
            { "month": "Mar", "amount": 128000 }
        ]
    })
}

/// An ad-hoc report with two explicit charts.
pub fn charted_report(first: &str, second: &str) -> Value {
    json!({
        "type": "report",
        "content": {
            "title": "Quarterly Revenue",
            "period": "Q1 2025",
            "kpis": [{ "label": "Revenue", "value": { "raw": 383000, "format": "currency" } }],
            "charts": [bar_chart(first, "Revenue by Month"), bar_chart(second, "Collections by Month")]
        }
    })
}

pub fn invoice() -> Value {
    json!({
        "type": "invoice",
        "content": {
            "number": "INV-001",
            "issueDate": "2025-03-01",
            "dueDate": "2025-03-15",
            "billTo": { "name": "Acme Ltd", "address": "14 Moi Avenue\nNairobi" },
            "items": [
                { "description": "Water", "quantity": 3, "unitPrice": 450 },
                { "description": "Service charge", "unitPrice": 2000 }
            ],
            "taxRate": 16,
            "notes": "Payable by bank transfer."
        }
    })
}

pub fn letter(paragraphs: usize) -> Value {
    let body: Vec<String> = (1..=paragraphs)
        .map(|i| {
            format!(
                "Paragraph {} confirms the terms discussed at the March meeting, including the \
                 revised service charge schedule and the maintenance window for the lifts.",
                i
            )
        })
        .collect();
    json!({
        "type": "letter",
        "content": {
            "recipient": { "name": "Amina Otieno", "address": "Flat 3B\nRiverside Court" },
            "subject": "Lease Renewal",
            "body": body
        }
    })
}
