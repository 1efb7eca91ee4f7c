//! Form field rules shared by the create and edit handlers.
//!
//! Lengths are counted in characters, matching what the forms enforce
//! client-side with `maxlength`.

pub fn validate_movie_input(title: &str, year: &str) -> Result<(), &'static str> {
    if title.is_empty() {
        return Err("Title cannot be empty");
    }

    if title.chars().count() > 60 {
        return Err("Title must be 60 characters or less");
    }

    if year.chars().count() != 4 {
        return Err("Year must be exactly 4 characters");
    }

    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("Name cannot be empty");
    }

    if name.chars().count() > 20 {
        return Err("Name must be 20 characters or less");
    }

    Ok(())
}
