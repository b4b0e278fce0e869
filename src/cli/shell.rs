//! Interactive shell
//!
//! A line-oriented command loop over the session and catalog services,
//! replacing the original's windowed frontend. Reads commands from any
//! `BufRead` and writes to any `Write`, which keeps it scriptable.

use std::io::{self, BufRead, Write};

use crate::models::Book;
use crate::services::{CatalogService, SessionService};
use crate::storage::Storage;

use super::validate;

/// The interactive command shell
pub struct Shell<'a> {
    sessions: SessionService<'a>,
    catalog: CatalogService<'a>,
    storage: &'a Storage,
}

impl<'a> Shell<'a> {
    /// Create a shell over an opened store
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            sessions: SessionService::new(storage),
            catalog: CatalogService::new(storage),
            storage,
        }
    }

    /// Run the command loop until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "stacks - library catalog shell (type 'help' for commands)")?;

        loop {
            write!(out, "stacks> ")?;
            out.flush()?;

            let line = match read_line(&mut input)? {
                Some(line) => line,
                None => break,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (cmd, rest) = match line.split_once(char::is_whitespace) {
                Some((cmd, rest)) => (cmd, rest.trim()),
                None => (line, ""),
            };

            match cmd {
                "help" => print_help(&mut out)?,
                "quit" | "exit" => break,
                "login" => self.cmd_login(rest, &mut out)?,
                "logout" => self.cmd_logout(&mut out)?,
                "whoami" => self.cmd_whoami(&mut out)?,
                "register" => self.cmd_register(&mut input, &mut out)?,
                "list" => self.cmd_list(&mut out)?,
                "search" => self.cmd_search(rest, &mut out)?,
                "find" => self.cmd_find(rest, &mut out)?,
                "add" => self.cmd_add(&mut input, &mut out)?,
                "remove" => self.cmd_remove(rest, &mut input, &mut out)?,
                "update" => self.cmd_update(rest, &mut input, &mut out)?,
                "status" => self.cmd_status(&mut out)?,
                _ => writeln!(out, "Unknown command: {} (try 'help')", cmd)?,
            }
        }

        Ok(())
    }

    fn cmd_login<W: Write>(&mut self, rest: &str, out: &mut W) -> io::Result<()> {
        let mut parts = rest.split_whitespace();
        let username = parts.next().unwrap_or("");
        let password = parts.next().unwrap_or("");

        if let Err(msg) = validate::validate_login(username, password) {
            return writeln!(out, "{}", msg);
        }

        match self.sessions.login(username, password) {
            Ok(Some(user)) => writeln!(out, "Welcome, {}!", user.full_name),
            Ok(None) => writeln!(out, "Invalid username or password"),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_logout<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.sessions.current_user().is_none() {
            return writeln!(out, "Not logged in");
        }
        self.sessions.logout();
        writeln!(out, "Logged out")
    }

    fn cmd_whoami<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.sessions.current_user() {
            Some(user) => writeln!(out, "{} - {}", user, user.full_name),
            None => writeln!(out, "Not logged in"),
        }
    }

    fn cmd_register<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        let Some(username) = prompt(input, out, "Username: ")? else {
            return writeln!(out, "Cancelled");
        };
        let Some(password) = prompt(input, out, "Password: ")? else {
            return writeln!(out, "Cancelled");
        };
        let Some(full_name) = prompt(input, out, "Full name: ")? else {
            return writeln!(out, "Cancelled");
        };
        let Some(email) = prompt(input, out, "Email: ")? else {
            return writeln!(out, "Cancelled");
        };
        let Some(phone) = prompt(input, out, "Phone: ")? else {
            return writeln!(out, "Cancelled");
        };

        if let Err(msg) = validate::validate_registration(&username, &password, &full_name) {
            return writeln!(out, "{}", msg);
        }

        match self
            .sessions
            .register(&username, &password, &full_name, &email, &phone)
        {
            Ok(true) => writeln!(out, "Registration successful! You can now login."),
            Ok(false) => writeln!(
                out,
                "Username already exists. Please choose a different username."
            ),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self.catalog.list() {
            Ok(books) => {
                for book in &books {
                    print_book_line(out, book)?;
                }
                writeln!(out, "{} book(s)", books.len())
            }
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_search<W: Write>(&self, query: &str, out: &mut W) -> io::Result<()> {
        if query.is_empty() {
            return writeln!(out, "Please enter a search term");
        }

        match self.catalog.search(query) {
            Ok(results) if results.is_empty() => {
                writeln!(out, "No books found matching your search")
            }
            Ok(results) => {
                for book in &results {
                    print_book_line(out, book)?;
                }
                writeln!(out, "{} match(es)", results.len())
            }
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_find<W: Write>(&self, isbn: &str, out: &mut W) -> io::Result<()> {
        if isbn.is_empty() {
            return writeln!(out, "Usage: find <isbn>");
        }

        match self.catalog.find(isbn) {
            Ok(Some(book)) => {
                print_book_line(out, &book)?;
                if !book.description.is_empty() {
                    writeln!(out, "  {}", book.description)?;
                }
                Ok(())
            }
            Ok(None) => writeln!(out, "Book not found with ISBN: {}", isbn),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_add<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> io::Result<()> {
        if !self.staff_gate(out)? {
            return Ok(());
        }

        let Some(fields) = read_book_fields(input, out)? else {
            return writeln!(out, "Cancelled");
        };

        let book = match fields.into_book(out)? {
            Some(book) => book,
            None => return Ok(()),
        };

        match self.catalog.find(&book.isbn) {
            Ok(Some(_)) => return writeln!(out, "Book with this ISBN already exists"),
            Ok(None) => {}
            Err(e) => return writeln!(out, "Error: {}", e),
        }

        match self.catalog.add(book) {
            Ok(()) => writeln!(out, "Book added successfully!"),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_remove<R: BufRead, W: Write>(
        &mut self,
        isbn: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        if !self.staff_gate(out)? {
            return Ok(());
        }
        if isbn.is_empty() {
            return writeln!(out, "Please enter ISBN to remove");
        }

        let Some(answer) = prompt(input, out, "Are you sure you want to remove this book? (y/n): ")?
        else {
            return writeln!(out, "Cancelled");
        };
        if !answer.trim().eq_ignore_ascii_case("y") {
            return writeln!(out, "Cancelled");
        }

        match self.catalog.remove(isbn) {
            Ok(true) => writeln!(out, "Book removed successfully!"),
            Ok(false) => writeln!(out, "Book not found with ISBN: {}", isbn),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_update<R: BufRead, W: Write>(
        &mut self,
        isbn: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        if !self.staff_gate(out)? {
            return Ok(());
        }
        if isbn.is_empty() {
            return writeln!(out, "Usage: update <isbn>");
        }

        match self.catalog.find(isbn) {
            Ok(Some(_)) => {}
            Ok(None) => return writeln!(out, "Book not found with ISBN: {}", isbn),
            Err(e) => return writeln!(out, "Error: {}", e),
        }

        let Some(fields) = read_book_fields_for(isbn, input, out)? else {
            return writeln!(out, "Cancelled");
        };

        let book = match fields.into_book(out)? {
            Some(book) => book,
            None => return Ok(()),
        };

        match self.catalog.update(book) {
            Ok(()) => writeln!(out, "Book updated successfully!"),
            Err(e) => writeln!(out, "Error: {}", e),
        }
    }

    fn cmd_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Data directory: {}", self.storage.paths().base_dir().display())?;
        match (self.storage.users.count(), self.storage.books.count()) {
            (Ok(users), Ok(books)) => writeln!(out, "{} user(s), {} book(s)", users, books)?,
            _ => writeln!(out, "Store counts unavailable")?,
        }
        if self.storage.persistence_degraded() {
            writeln!(
                out,
                "WARNING: persistence degraded - changes are held in memory only"
            )?;
        }
        Ok(())
    }

    /// Gate catalog mutations behind an admin or librarian session
    fn staff_gate<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        match self.sessions.current_user() {
            Some(user) if user.role.is_staff() => Ok(true),
            Some(_) => {
                writeln!(out, "Only admin and librarian accounts may manage the catalog")?;
                Ok(false)
            }
            None => {
                writeln!(out, "Please login first")?;
                Ok(false)
            }
        }
    }
}

/// Raw book form fields, read before numeric parsing
struct BookFields {
    isbn: String,
    title: String,
    author: String,
    genre: String,
    publisher: String,
    year: String,
    copies: String,
    description: String,
}

impl BookFields {
    /// Validate and parse the form into a Book, printing the first problem
    ///
    /// Returns Ok(None) when validation fails (already reported to `out`).
    fn into_book<W: Write>(self, out: &mut W) -> io::Result<Option<Book>> {
        if let Err(msg) =
            validate::validate_book_fields(&self.isbn, &self.title, &self.author, &self.genre)
        {
            writeln!(out, "{}", msg)?;
            return Ok(None);
        }

        let year = match validate::parse_year(&self.year) {
            Ok(year) => year,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                return Ok(None);
            }
        };
        let copies = match validate::parse_copies(&self.copies) {
            Ok(copies) => copies,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                return Ok(None);
            }
        };

        Ok(Some(Book::new(
            self.isbn,
            self.title,
            self.author,
            self.genre,
            self.publisher,
            year,
            copies,
            self.description,
        )))
    }
}

/// Prompt for all book form fields, ISBN included
fn read_book_fields<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<BookFields>> {
    let Some(isbn) = prompt(input, out, "ISBN (*): ")? else {
        return Ok(None);
    };
    read_book_fields_inner(isbn, input, out)
}

/// Prompt for the book form fields of a known ISBN
fn read_book_fields_for<R: BufRead, W: Write>(
    isbn: &str,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<BookFields>> {
    read_book_fields_inner(isbn.to_string(), input, out)
}

fn read_book_fields_inner<R: BufRead, W: Write>(
    isbn: String,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<BookFields>> {
    let Some(title) = prompt(input, out, "Title (*): ")? else {
        return Ok(None);
    };
    let Some(author) = prompt(input, out, "Author (*): ")? else {
        return Ok(None);
    };
    let Some(genre) = prompt(input, out, "Genre (*): ")? else {
        return Ok(None);
    };
    let Some(publisher) = prompt(input, out, "Publisher: ")? else {
        return Ok(None);
    };
    let Some(year) = prompt(input, out, "Year: ")? else {
        return Ok(None);
    };
    let Some(copies) = prompt(input, out, "Copies (*): ")? else {
        return Ok(None);
    };
    let Some(description) = prompt(input, out, "Description: ")? else {
        return Ok(None);
    };

    Ok(Some(BookFields {
        isbn,
        title,
        author,
        genre,
        publisher,
        year,
        copies,
        description,
    }))
}

fn print_book_line<W: Write>(out: &mut W, book: &Book) -> io::Result<()> {
    writeln!(
        out,
        "{}  {}  [{} of {} available]",
        book.isbn, book, book.available_copies, book.total_copies
    )
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  login <username> <password>   Sign in")?;
    writeln!(out, "  logout                        End the session")?;
    writeln!(out, "  register                      Create a new account")?;
    writeln!(out, "  whoami                        Show the active session")?;
    writeln!(out, "  list                          Show the full catalog")?;
    writeln!(out, "  search <query>                Search title/author/genre/publisher/ISBN")?;
    writeln!(out, "  find <isbn>                   Show one book")?;
    writeln!(out, "  add                           Add a book (staff only)")?;
    writeln!(out, "  remove <isbn>                 Remove a book (staff only)")?;
    writeln!(out, "  update <isbn>                 Replace a book's details (staff only)")?;
    writeln!(out, "  status                        Show store info")?;
    writeln!(out, "  quit                          Exit")
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;
    Ok(read_line(input)?.map(|line| line.trim().to_string()))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}
