//! Interactive numbered-menu navigation over a catalog.
//!
//! # Responsibility
//! - Walk category -> sub-category -> record menus and drive CRUD calls.
//! - Read from an injected input source so sessions can be scripted.
//!
//! # Invariants
//! - Invalid or non-numeric selections re-prompt the same menu.
//! - End of input ends the session as if the user chose Quit.
//! - Menus re-read the catalog each iteration, so cascade deletes are
//!   reflected immediately.

use catalog_core::Catalog;
use log::{debug, info, warn};
use std::io::{self, BufRead, Write};

const INVALID_NUMBER: &str = "Invalid Input. Please ensure you are entering an integer.";
const OUT_OF_RANGE: &str =
    "Invalid Input. Please ensure the number you enter is within range of the options shown.";

/// Where a sub-menu hands control back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Return to the enclosing menu.
    Back,
    /// Unwind to the main menu.
    MainMenu,
    /// Input is exhausted; unwind and end the session.
    Exit,
}

/// Menu session bound to one catalog and one input/output pair.
pub struct Navigator<'a, R: BufRead, W: Write> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Navigator<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Runs the main menu until Quit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let options = ["Browse Catalog", "Add a New Item", "Quit"].map(String::from);
        loop {
            let Some(choice) = self.choose("Main Menu", &options)? else {
                return Ok(());
            };
            let step = match choice {
                0 => self.categories_menu()?,
                1 => self.add_item()?,
                _ => return Ok(()),
            };
            if step == Step::Exit {
                return Ok(());
            }
        }
    }

    fn categories_menu(&mut self) -> io::Result<Step> {
        loop {
            let names: Vec<String> = self.catalog.category_names().map(String::from).collect();
            let mut options = names.clone();
            options.push("Go Back".to_string());

            let Some(choice) = self.choose("Choose Category", &options)? else {
                return Ok(Step::Exit);
            };
            let Some(category) = names.get(choice) else {
                return Ok(Step::Back);
            };
            match self.sub_categories_menu(category)? {
                Step::Back => continue,
                step => return Ok(step),
            }
        }
    }

    fn sub_categories_menu(&mut self, category: &str) -> io::Result<Step> {
        loop {
            if self.catalog.get_category(category).is_none() {
                return Ok(Step::Back);
            }
            let names: Vec<String> = self
                .catalog
                .sub_category_names(category)
                .map(String::from)
                .collect();
            let mut options = names.clone();
            options.push("Go Back".to_string());
            options.push("Main Menu".to_string());

            let Some(choice) = self.choose("Choose Sub-Category", &options)? else {
                return Ok(Step::Exit);
            };
            let Some(sub_category) = names.get(choice) else {
                return Ok(back_or_main(choice, names.len()));
            };
            match self.records_menu(category, sub_category)? {
                Step::Back => continue,
                step => return Ok(step),
            }
        }
    }

    fn records_menu(&mut self, category: &str, sub_category: &str) -> io::Result<Step> {
        loop {
            if self
                .catalog
                .get_sub_category(category, sub_category)
                .is_none()
            {
                return Ok(Step::Back);
            }
            let names: Vec<String> = self
                .catalog
                .record_names(category, sub_category)
                .map(String::from)
                .collect();
            let mut options = names.clone();
            options.push("Go Back".to_string());
            options.push("Main Menu".to_string());

            let Some(choice) = self.choose("Choose Item", &options)? else {
                return Ok(Step::Exit);
            };
            let Some(name) = names.get(choice) else {
                return Ok(back_or_main(choice, names.len()));
            };
            match self.record_menu(category, sub_category, name)? {
                Step::Back => continue,
                step => return Ok(step),
            }
        }
    }

    fn record_menu(&mut self, category: &str, sub_category: &str, name: &str) -> io::Result<Step> {
        let options = [
            "Update Name",
            "Update Description",
            "Delete Item",
            "Main Menu",
        ]
        .map(String::from);
        let mut name = name.to_string();

        loop {
            let Some(record) = self.catalog.get_item(category, sub_category, &name) else {
                return Ok(Step::Back);
            };
            writeln!(self.output)?;
            writeln!(self.output, "{record}")?;

            let Some(choice) = self.choose("Item Options", &options)? else {
                return Ok(Step::Exit);
            };
            match choice {
                0 => {
                    let Some(new_name) = self.prompt("Enter New Name: ")? else {
                        return Ok(Step::Exit);
                    };
                    match self
                        .catalog
                        .rename_item(category, sub_category, &name, &new_name)
                    {
                        Ok(()) => {
                            info!("event=record_rename module=cli status=ok");
                            name = new_name;
                        }
                        Err(err) => self.report("record_rename", &err)?,
                    }
                }
                1 => {
                    let Some(description) = self.prompt("Enter New Description: ")? else {
                        return Ok(Step::Exit);
                    };
                    match self
                        .catalog
                        .set_description(category, sub_category, &name, &description)
                    {
                        Ok(()) => info!("event=record_update module=cli status=ok"),
                        Err(err) => self.report("record_update", &err)?,
                    }
                }
                2 => match self.confirm_delete()? {
                    Some(true) => {
                        self.catalog.delete_item(category, sub_category, &name);
                        info!("event=record_delete module=cli status=ok");
                        return Ok(Step::MainMenu);
                    }
                    Some(false) => continue,
                    None => return Ok(Step::Exit),
                },
                _ => return Ok(Step::MainMenu),
            }
        }
    }

    fn confirm_delete(&mut self) -> io::Result<Option<bool>> {
        let options = ["Yes", "No"].map(String::from);
        Ok(self
            .choose("Delete this item?", &options)?
            .map(|choice| choice == 0))
    }

    fn add_item(&mut self) -> io::Result<Step> {
        writeln!(self.output)?;
        let mut fields = Vec::with_capacity(4);
        for label in [
            "Enter Category: ",
            "Enter Sub-Category: ",
            "Enter Item Name: ",
            "Enter Item Description: ",
        ] {
            let Some(value) = self.prompt(label)? else {
                return Ok(Step::Exit);
            };
            fields.push(value);
        }

        match self
            .catalog
            .add_item(&fields[0], &fields[1], &fields[2], &fields[3])
        {
            Ok(()) => {
                info!("event=record_add module=cli status=ok");
                writeln!(self.output, "Item added.")?;
            }
            Err(err) => {
                self.report("record_add", &err)?;
                writeln!(
                    self.output,
                    "Please try again with a uniquely-named, non-blank item."
                )?;
            }
        }
        Ok(Step::Back)
    }

    /// Prints a numbered menu and reads a selection.
    ///
    /// Returns the 0-based option index, or `None` at end of input.
    fn choose(&mut self, title: &str, options: &[String]) -> io::Result<Option<usize>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{title}")?;
            writeln!(self.output)?;
            for (index, option) in options.iter().enumerate() {
                writeln!(self.output, "{}. {option}", index + 1)?;
            }
            writeln!(self.output)?;

            let Some(line) = self.prompt("Enter Option Number: ")? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(number) if (1..=options.len()).contains(&number) => {
                    return Ok(Some(number - 1));
                }
                Ok(_) => writeln!(self.output, "{OUT_OF_RANGE}")?,
                Err(_) => writeln!(self.output, "{INVALID_NUMBER}")?,
            }
            debug!("event=menu_reprompt module=cli menu={title}");
        }
    }

    /// Prints `label` and reads one trimmed line, or `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, event: &str, err: &catalog_core::CatalogError) -> io::Result<()> {
        warn!(
            "event={event} module=cli status=rejected error_code={}",
            err.code()
        );
        writeln!(self.output, "{err}")
    }
}

fn back_or_main(choice: usize, item_count: usize) -> Step {
    if choice == item_count {
        Step::Back
    } else {
        Step::MainMenu
    }
}
