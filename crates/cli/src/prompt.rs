//! Line-based login prompt.

use std::io::{BufRead, Write};

use colored::Colorize;
use rocket::{LoginAttempt, LoginNotice, LoginPrompt};
use tracing::{info, warn};

/// Reads credentials line by line from `input`, writing prompts and notices
/// to `output`.
///
/// End of input cancels the login. After a failure notice the user has to
/// press Enter before the form is shown again.
pub struct TerminalPrompt<R, W> {
	input: R,
	output: W,
	mask_password: bool,
	greeted: bool,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
	pub fn new(input: R, output: W) -> Self {
		Self {
			input,
			output,
			mask_password: false,
			greeted: false,
		}
	}

	/// Reads the password from the terminal without echo.
	pub fn mask_password(mut self, mask: bool) -> Self {
		self.mask_password = mask;
		self
	}

	pub fn into_output(self) -> W {
		self.output
	}

	/// `None` on end of input or a read error.
	fn read_line(&mut self) -> Option<String> {
		let mut line = String::new();
		match self.input.read_line(&mut line) {
			Ok(0) => None,
			Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
			Err(err) => {
				warn!(target = "rocket", error = %err, "failed to read from terminal");
				None
			}
		}
	}

	fn ask(&mut self, label: &str) -> Option<String> {
		let _ = write!(self.output, "{label}: ");
		let _ = self.output.flush();
		self.read_line()
	}

	fn ask_password(&mut self) -> Option<String> {
		if !self.mask_password {
			return self.ask("Password");
		}

		match dialoguer::Password::new()
			.with_prompt("Password")
			.allow_empty_password(true)
			.interact()
		{
			Ok(password) => Some(password),
			Err(err) => {
				warn!(target = "rocket", error = %err, "failed to read password");
				None
			}
		}
	}
}

impl<R: BufRead, W: Write> LoginPrompt for TerminalPrompt<R, W> {
	fn next_attempt(&mut self) -> LoginAttempt {
		if !self.greeted {
			let _ = writeln!(self.output, "{}", "Sign in to continue (Ctrl-D to cancel)".bold());
			self.greeted = true;
		}

		let Some(login) = self.ask("Login") else {
			let _ = writeln!(self.output);
			return LoginAttempt::Cancel;
		};
		let Some(password) = self.ask_password() else {
			let _ = writeln!(self.output);
			return LoginAttempt::Cancel;
		};

		LoginAttempt::Submit {
			login: login.trim().to_string(),
			password,
		}
	}

	fn notify(&mut self, notice: &LoginNotice) {
		match notice {
			LoginNotice::Succeeded => {
				let _ = writeln!(self.output, "{}", notice.to_string().green());
			}
			LoginNotice::Failed(_) => {
				let _ = writeln!(self.output, "{}", notice.to_string().red());
				let _ = write!(self.output, "Press Enter to try again");
				let _ = self.output.flush();
				// EOF here surfaces as a cancel on the next attempt.
				let _ = self.read_line();
			}
		}
	}
}

/// Prompt used with `--no-input`: cancels immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInputPrompt;

impl LoginPrompt for NoInputPrompt {
	fn next_attempt(&mut self) -> LoginAttempt {
		info!(target = "rocket", "login required but input is disabled");
		LoginAttempt::Cancel
	}

	fn notify(&mut self, _notice: &LoginNotice) {}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;

	use rocket::LoginFailure;

	use super::*;

	fn prompt(input: &str) -> TerminalPrompt<Cursor<Vec<u8>>, Vec<u8>> {
		TerminalPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
	}

	#[test]
	fn reads_login_and_password() {
		let mut prompt = prompt("alice \r\nsecret pass\n");

		assert_eq!(prompt.next_attempt(), LoginAttempt::submit("alice", "secret pass"));

		let output = String::from_utf8(prompt.into_output()).unwrap();
		assert!(output.contains("Login: "));
		assert!(output.contains("Password: "));
	}

	#[test]
	fn end_of_input_cancels() {
		assert_eq!(prompt("").next_attempt(), LoginAttempt::Cancel);
		assert_eq!(prompt("alice\n").next_attempt(), LoginAttempt::Cancel);
	}

	#[test]
	fn blank_fields_are_submitted_for_validation() {
		assert_eq!(prompt("\n\n").next_attempt(), LoginAttempt::submit("", ""));
	}

	#[test]
	fn failure_waits_for_enter() {
		let mut prompt = prompt("a\nb\n\nc\nd\n");

		assert_eq!(prompt.next_attempt(), LoginAttempt::submit("a", "b"));
		prompt.notify(&LoginNotice::Failed(LoginFailure::Rejected));
		assert_eq!(prompt.next_attempt(), LoginAttempt::submit("c", "d"));

		let output = String::from_utf8(prompt.into_output()).unwrap();
		assert!(output.contains("Press Enter to try again"));
		assert!(output.contains(&LoginFailure::Rejected.to_string()));
		assert_eq!(output.matches("Sign in to continue").count(), 1);
	}

	#[test]
	fn success_does_not_block() {
		let mut prompt = prompt("a\nb\n");
		assert_eq!(prompt.next_attempt(), LoginAttempt::submit("a", "b"));
		prompt.notify(&LoginNotice::Succeeded);

		let output = String::from_utf8(prompt.into_output()).unwrap();
		assert!(output.contains(&LoginNotice::Succeeded.to_string()));
	}

	#[test]
	fn no_input_prompt_cancels() {
		assert_eq!(NoInputPrompt.next_attempt(), LoginAttempt::Cancel);
	}
}
