use tubefetch_core::{result_location, DownloadForm, DownloadOutcome};

#[test]
fn plain_message_is_left_alone() {
    let outcome = DownloadOutcome {
        success: true,
        message: "Done".into(),
    };
    assert_eq!(result_location(&outcome), "/result?success=true&message=Done");
}

#[test]
fn message_is_encoded_as_uri_component() {
    let outcome = DownloadOutcome {
        success: false,
        message: "Erreur lors du téléchargement : 404 & co (x/y)".into(),
    };
    assert_eq!(
        result_location(&outcome),
        "/result?success=false&message=Erreur%20lors%20du%20t%C3%A9l%C3%A9chargement%20%3A%20404%20%26%20co%20(x%2Fy)"
    );
}

#[test]
fn form_fields_put_url_first_and_skip_shadowing_option() {
    let form = DownloadForm::new("https://example.com/v")
        .with_option("format", "audio")
        .with_option("url", "https://other.example.com");

    assert_eq!(
        form.fields(),
        vec![("url", "https://example.com/v"), ("format", "audio")]
    );
}
