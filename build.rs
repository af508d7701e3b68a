use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/crop_diseases.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let diseases = catalog.get("diseases").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'diseases' field\n\
             The catalog must have a top-level 'diseases' array.\n"
        );
    });

    let records = diseases.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'diseases' must be an array\n\
             Got: {diseases}\n"
        );
    });

    assert!(
        !records.is_empty(),
        "\n\nCATALOG BUILD ERROR: 'diseases' must not be empty\n"
    );

    let total_symptoms = validate_diseases(records);

    println!(
        "cargo:warning=Validated catalog: {} diseases, {total_symptoms} total symptoms",
        records.len()
    );
}

fn validate_diseases(records: &[serde_json::Value]) -> usize {
    let mut total_symptoms = 0;

    for (i, disease) in records.iter().enumerate() {
        let disease_id = disease
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        validate_disease_fields(disease, disease_id, i);
        total_symptoms += validate_disease_symptoms(disease, disease_id);
    }

    total_symptoms
}

fn validate_disease_fields(disease: &serde_json::Value, disease_id: &str, index: usize) {
    assert!(
        disease.get("id").is_some(),
        "\n\nCATALOG BUILD ERROR: Disease at index {index} missing 'id' field\n"
    );
    assert!(
        disease.get("name").is_some(),
        "\n\nCATALOG BUILD ERROR: Disease '{disease_id}' (index {index}) missing 'name' field\n"
    );
    assert!(
        disease.get("symptoms").is_some(),
        "\n\nCATALOG BUILD ERROR: Disease '{disease_id}' (index {index}) missing 'symptoms' field\n"
    );
}

fn validate_disease_symptoms(disease: &serde_json::Value, disease_id: &str) -> usize {
    let symptoms = disease
        .get("symptoms")
        .and_then(|s| s.as_array())
        .map_or(0, Vec::len);

    assert!(
        symptoms > 0,
        "\n\nCATALOG BUILD ERROR: Disease '{disease_id}' has no symptoms\n\
         Every disease must list at least one symptom.\n"
    );

    symptoms
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/crop_diseases.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
