/// The "Register" action of the countdown section.
#[derive(Debug, Clone)]
pub struct RegisterView {
    registration_url: String,
    registered: bool,
}

impl RegisterView {
    pub fn new(registration_url: String) -> Self {
        Self {
            registration_url,
            registered: false,
        }
    }

    /// Flips the view to its confirmation state and hands back the page to
    /// open. Registering is one-way, nothing resets the flag.
    pub fn register(&mut self) -> &str {
        self.registered = true;
        &self.registration_url
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub fn registration_url(&self) -> &str {
        &self.registration_url
    }
}
