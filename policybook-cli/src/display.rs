use colored::{ColoredString, Colorize};

use policybook_core::{Model, Person, ViewKind};

fn renewal_label(days: i64) -> ColoredString {
    let text = match days {
        d if d < 0 => format!("overdue by {} days", -d),
        0 => "renews today".to_string(),
        1 => "renews tomorrow".to_string(),
        d => format!("renews in {} days", d),
    };
    match days {
        d if d <= 7 => text.red(),
        d if d <= 30 => text.yellow(),
        _ => text.green(),
    }
}

fn print_person(position: usize, person: &Person) {
    let policy = person.policy();
    println!("{:>3}. {}", position, person.name().as_str().bold());
    println!("     Phone:   {}", person.phone());
    println!("     Email:   {}", person.email());
    println!("     Address: {}", person.address());
    println!(
        "     Policy:  {} ({}) due {} [{}]",
        policy.number(),
        policy.policy_type(),
        policy.renewal_date(),
        renewal_label(policy.days_until_renewal())
    );
    if !person.note().is_empty() {
        println!("     Note:    {}", person.note().as_str().italic());
    }
    if !person.tags().is_empty() {
        let tags: Vec<String> = person.tags().iter().map(|t| format!("[{}]", t)).collect();
        println!("     Tags:    {}", tags.join(" ").cyan());
    }
}

/// Prints one view as a numbered list
pub fn print_view(model: &Model, view: ViewKind) {
    let (title, persons) = match view {
        ViewKind::Persons => ("Persons", model.filtered_person_list()),
        ViewKind::Renewals => ("Upcoming renewals", model.renewals_list()),
    };

    if persons.is_empty() {
        println!("{}", format!("{}: none to show.", title).yellow());
        return;
    }

    println!("{}", format!("{} ({})", title, persons.len()).bold().underline());
    for (i, person) in persons.iter().enumerate() {
        print_person(i + 1, person);
    }
}

pub fn print_feedback(feedback: &str) {
    println!("{}", feedback.green());
}

pub fn print_error(message: &str) {
    eprintln!("{}", message.red());
}
