use chrono::{Datelike, NaiveDate};
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use repeat_core::date::format_date;

/// Human phrase for `date` relative to `today`, e.g. "in 5 days".
pub fn relative_to(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else {
        HumanTime::from(date.signed_duration_since(today)).to_string()
    }
}

pub fn display_dates(dates: &[NaiveDate], today: NaiveDate) {
    if dates.is_empty() {
        println!("No upcoming dates.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Weekday", "Relative"]);

    for (index, date) in dates.iter().enumerate() {
        let mut row = Row::new();

        let mut date_cell = Cell::new(format_date(*date));
        if index == 0 {
            date_cell = date_cell.fg(Color::Green).add_attribute(Attribute::Bold);
        }
        row.add_cell(date_cell);
        row.add_cell(Cell::new(date.weekday().to_string()));

        let relative_cell = if *date < today {
            Cell::new(relative_to(*date, today)).fg(Color::DarkGrey)
        } else {
            Cell::new(relative_to(*date, today))
        };
        row.add_cell(relative_cell);

        table.add_row(row);
    }

    println!("{table}");
}
