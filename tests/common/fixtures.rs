//! Static model-reply corpora used across harnesses.
//!
//! Each constant is a verbatim reply the vision model could return. The
//! corpora group them by how much work the normalizer needs to do.

/// Complete, valid current-shape reply with no surrounding text.
pub const REPLY_COMPLETE: &str = r#"{"aircraft_registration":"N123AB","summary":"ok","is_mult":true,"log_entries":[{"description_of_work_performed":"Tire change","is_airworthy":true}]}"#;

/// [`REPLY_COMPLETE`] with its final `}]}` cut off.
pub const REPLY_TRUNCATED_CLOSERS: &str = r#"{"aircraft_registration":"N123AB","summary":"ok","is_mult":true,"log_entries":[{"description_of_work_performed":"Tire change","is_airworthy":true"#;

/// Cut inside the first entry; only top-level scalars survive.
pub const REPLY_TRUNCATED_NO_ENTRIES: &str = r#"{"aircraft_registration":"N123AB","summary": "partial run","is_mult":true,"log_entries":[{"description_of_work_performed":"Engine run-up and mag check, left mag drop 1"#;

/// Legacy single-entry shape.
pub const REPLY_LEGACY: &str = r#"{"aircraft_registration":"N1","description_of_work_performed":"Oil change","is_airworthy":false}"#;

/// A typical chatty reply: prose, a fenced block, then more prose.
pub const REPLY_FENCED: &str = r#"I've analyzed the maintenance log. Here is the structured data:

```json
{
  "aircraft_registration": "N7342K",
  "aircraft_make_model": "Piper PA-28-181",
  "summary": "100-hour inspection with two corrective actions",
  "is_mult": true,
  "log_entries": [
    {
      "description_of_work_performed": "Performed 100-hour inspection IAW Piper service manual",
      "part_number_replaced": [],
      "tach_time": "2345.6",
      "hobbs_time": "N/A",
      "manual_reference": "Piper SM 761-783",
      "performed_by": "R. Alvarez",
      "license_number": "A&P 3456789 IA",
      "date": "03/14/2024",
      "risk_level": "Low",
      "urgency": "Normal",
      "is_airworthy": true
    },
    {
      "description_of_work_performed": "Replaced vacuum pump",
      "part_number_replaced": ["215CC", " "],
      "ad_compliance": "unknown",
      "risk_level": "Medium",
      "urgency": "Medium",
      "is_airworthy": "yes"
    }
  ]
}
```

Let me know if you need anything else!"#;

/// Fenced block with a trailing comma and an unquoted-looking boolean string.
pub const REPLY_SLOPPY: &str = "```json\n{\"aircraft_registration\": \"C-GXYZ\", \"summary\": \"Pitot heat inop\", \"is_mult\": \"false\", \"log_entries\": [{\"description_of_work_performed\": \"Replaced pitot heater element\", \"part_number_replaced\": \"PH-22\", \"is_airworthy\": \"airworthy\",},],}\n```";

/// Truncated after two complete entries; the third is cut mid-value.
pub const REPLY_TRUNCATED_MID_ENTRY: &str = r#"```json
{
  "aircraft_registration": "N512RV",
  "aircraft_make_model": "Van's RV-7A",
  "summary": "Condition inspection",
  "is_mult": true,
  "log_entries": [
    {"description_of_work_performed": "Condition inspection completed", "part_number_replaced": [], "is_airworthy": true},
    {"description_of_work_performed": "Replaced brake pads", "part_number_replaced": ["066-10500", "066-10500"], "performed_by": "K. Osei"},
    {"description_of_work_performed": "Adjusted idle mixt"#;

/// Python-style booleans: no amount of structural repair makes this decode.
pub const REPLY_PYTHON_BOOLS: &str = r#"{"aircraft_registration": "N88TW", "summary": "Propeller overhaul", "is_mult": True, "log_entries": [{"description_of_work_performed": "Propeller overhauled and reinstalled", "part_number_replaced": ["HC-C2YK-1BF"], "is_airworthy": True}, {"description_of_work_performed": "Spinner bulkhead replaced", "performed_by": "T. Wu"}]}"#;

/// Prose only: the model refused or could not read the image.
pub const REPLY_REFUSAL: &str = "I'm sorry, but the image is too blurry for me to read any maintenance entries.";

/// Every reply the pipeline is expected to turn into a record.
pub const CORPUS_RECOVERABLE: &[&str] = &[
    REPLY_COMPLETE,
    REPLY_TRUNCATED_CLOSERS,
    REPLY_LEGACY,
    REPLY_FENCED,
    REPLY_SLOPPY,
    REPLY_TRUNCATED_MID_ENTRY,
    REPLY_PYTHON_BOOLS,
];

/// Replies that must end in a typed failure.
pub const CORPUS_UNRECOVERABLE: &[&str] = &[REPLY_TRUNCATED_NO_ENTRIES, REPLY_REFUSAL];
