use assert_cmd::Command;

pub fn tablefill_cmd() -> Command {
	let mut cmd = Command::cargo_bin("tablefill").expect("tablefill binary is built");
	cmd.env("NO_COLOR", "1");
	cmd
}
