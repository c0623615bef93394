use nexus_core::widgets::password;

pub fn run(pw: &str) {
    let strength = password::strength(pw);
    println!(
        "{} ({}%, score {}/6)",
        strength.label(),
        strength.percentage(),
        password::score(pw)
    );
}
