use anyhow::Result;

use novapage_core::form::FormSubmitter;
use novapage_core::{ContactForm, HttpTransport, PageConfig};

pub async fn run(
    config: &PageConfig,
    name: String,
    email: String,
    message: String,
    endpoint: Option<String>,
) -> Result<()> {
    let transport = HttpTransport::new(&config.form)?;
    let mut submitter = FormSubmitter::new(&config.form);
    if let Some(endpoint) = endpoint {
        submitter = submitter.with_endpoint(endpoint);
    }

    println!("Sending message to {}", submitter.endpoint().unwrap_or("(no endpoint)"));
    let form = ContactForm::new(name, email, message);
    submitter.submit(&transport, &form).await?;

    println!("Message sent!");
    Ok(())
}
