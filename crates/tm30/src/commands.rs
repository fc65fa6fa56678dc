//! Handlers for the profile, spreadsheet, and PIN subcommands.

use std::path::Path;

use tm30_protocol::{Person, PersonId, current_year, validate_birth_date};
use tm30_store::{MAX_ATTEMPTS, PinManager, ProfileStore, export_csv, import_csv};

use crate::{
    cli::{AddArgs, EditArgs, PinCommands},
    error::{Error, Result},
};

/// One line per profile.
pub fn list(profiles: &ProfileStore) -> Result<()> {
    let all = profiles.all();
    if all.is_empty() {
        println!("no profiles saved");
        return Ok(());
    }
    for p in all {
        println!(
            "{}  {} {}  {}  {}",
            p.id, p.first_name, p.last_name, p.passport_no, p.nationality
        );
    }
    Ok(())
}

/// Every field of one profile.
pub fn show(profiles: &ProfileStore, id: u64) -> Result<()> {
    let id = PersonId(id);
    let p = profiles.get(id).ok_or(Error::NotFound(id))?;
    println!("id:               {}", p.id);
    println!("first name:       {}", p.first_name);
    println!("last name:        {}", p.last_name);
    println!("passport:         {}", p.passport_no);
    println!("nationality:      {}", p.nationality);
    println!("nationality code: {}", p.nationality_code);
    println!("gender:           {}", p.gender.label());
    println!("birth date:       {}", p.birth_date);
    println!("phone:            {}", p.phone_no);
    if let Some(check_in) = &p.check_in {
        println!("check-in:         {check_in}");
    }
    if let Some(check_out) = &p.check_out {
        println!("check-out:        {check_out}");
    }
    Ok(())
}

/// Validate and save a new profile.
pub fn add(profiles: &ProfileStore, args: AddArgs) -> Result<()> {
    if !validate_birth_date(&args.birth_date, current_year()) {
        return Err(Error::InvalidBirthDate(args.birth_date));
    }
    let person = Person {
        id: PersonId(0),
        first_name: args.first_name,
        last_name: args.last_name,
        passport_no: args.passport,
        nationality: args.nationality,
        nationality_code: args.nationality_code,
        gender: args.gender,
        birth_date: args.birth_date,
        phone_no: args.phone,
        check_in: args.check_in,
        check_out: args.check_out,
    };
    let saved = profiles.save(person, None)?;
    println!("saved profile {}", saved.id);
    Ok(())
}

/// Apply the given flags to an existing profile.
pub fn edit(profiles: &ProfileStore, id: u64, args: EditArgs) -> Result<()> {
    let id = PersonId(id);
    let mut p = profiles.get(id).ok_or(Error::NotFound(id))?;
    if let Some(v) = args.first_name {
        p.first_name = v;
    }
    if let Some(v) = args.last_name {
        p.last_name = v;
    }
    if let Some(v) = args.passport {
        p.passport_no = v;
    }
    if let Some(v) = args.nationality {
        p.nationality = v;
    }
    if let Some(v) = args.nationality_code {
        p.nationality_code = v;
    }
    if let Some(v) = args.gender {
        p.gender = v;
    }
    if let Some(v) = args.birth_date {
        if !validate_birth_date(&v, current_year()) {
            return Err(Error::InvalidBirthDate(v));
        }
        p.birth_date = v;
    }
    if let Some(v) = args.phone {
        p.phone_no = v;
    }
    if args.check_in.is_some() {
        p.check_in = args.check_in;
    }
    if args.check_out.is_some() {
        p.check_out = args.check_out;
    }
    profiles.save(p, Some(id))?;
    println!("updated profile {id}");
    Ok(())
}

/// Delete a profile by id.
pub fn delete(profiles: &ProfileStore, id: u64) -> Result<()> {
    let id = PersonId(id);
    if profiles.delete(id)? {
        println!("deleted profile {id}");
        Ok(())
    } else {
        Err(Error::NotFound(id))
    }
}

/// Import profiles from a CSV file.
pub fn import(profiles: &ProfileStore, path: &Path) -> Result<()> {
    let summary = import_csv(profiles, path)?;
    println!(
        "imported {} profiles ({} rows skipped)",
        summary.imported, summary.skipped
    );
    Ok(())
}

/// Export all profiles to a CSV file.
pub fn export(profiles: &ProfileStore, path: &Path) -> Result<()> {
    let rows = export_csv(profiles, path)?;
    println!("exported {rows} profiles to {}", path.display());
    Ok(())
}

/// Dispatch the `pin` subcommands.
pub fn pin(pin: &PinManager, command: PinCommands) -> Result<()> {
    match command {
        PinCommands::Set { pin: new_pin } => {
            pin.set_pin(&new_pin)?;
            println!("PIN set");
        }
        PinCommands::Remove => {
            pin.remove_pin()?;
            println!("PIN removed");
        }
        PinCommands::Status => {
            if pin.is_enabled() {
                println!(
                    "PIN is set ({}/{MAX_ATTEMPTS} failed attempts, session {})",
                    pin.attempts(),
                    if pin.session_valid() { "open" } else { "closed" }
                );
            } else {
                println!("no PIN set");
            }
        }
        PinCommands::Reset { yes } => {
            if !yes {
                println!("this wipes the PIN and every saved profile; re-run with --yes");
                return Ok(());
            }
            pin.reset_all()?;
            println!("store reset");
        }
    }
    Ok(())
}
