use std::fs;

use sec_insights::extractors::SectionExtractor;
use sec_insights::pipeline;
use sec_insights::storage::layout::{SECTION_DEBUG_FILE, SECTION_META_FILE, SECTION_TEXT_FILE};
use sec_insights::storage::FilingStore;
use sec_insights::{Company, FinancialData};
use tempfile::tempdir;
use tokio_test::assert_ok;

const FILING_2023: &str = "<html><body>
<p>TABLE OF CONTENTS</p>
<p>ITEM 8. Financial Statements and Supplementary Data ..... 28</p>
<p>ITEM 9. Changes in and Disagreements with Accountants ..... 60</p>
<p>ITEM&nbsp;8. Financial Statements and Supplementary Data</p>
<p>Net Income: $96,995</p>
<p>Operating Income: $114,301</p>
<p>Summary: Services revenue reached a record.</p>
<p>ITEM 9. Changes in and Disagreements with Accountants</p>
</body></html>";

const FILING_2021: &str = "ITEM 8. Financial Statements
Net Income: -$50
Operating Income: $1,200
ITEM 9A. Controls and Procedures";

const FILING_WITHOUT_FIGURES: &str = "ITEM 8. Financial Statements
See the net income and operating income discussion elsewhere.
ITEM 9. Changes";

const FILING_WITHOUT_KEYWORDS: &str = "ITEM 8. Financial Statements, page 40. ITEM 9. Changes";

#[test]
fn test_extract_then_load() {
    let tmp = tempdir().unwrap();
    let store = FilingStore::new(tmp.path()).unwrap();

    store.save_full_submission(Company::Apple, "0000320193-23-000106", FILING_2023).unwrap();
    store.save_full_submission(Company::Apple, "0000320193-21-000105", FILING_2021).unwrap();
    store.save_full_submission(Company::Apple, "0000320193-19-000119", FILING_WITHOUT_FIGURES).unwrap();
    store.save_full_submission(Company::Apple, "0000320193-96-000023", FILING_WITHOUT_KEYWORDS).unwrap();
    // A year folder with nothing downloaded and a folder whose name has no year.
    fs::create_dir_all(store.filing_dir(Company::Apple, "0000320193-05-000001")).unwrap();
    fs::create_dir_all(store.filing_dir(Company::Apple, "scratch")).unwrap();

    let summary = assert_ok!(pipeline::extract_sections(
        &store,
        Company::Apple,
        &SectionExtractor::new(),
        true
    ));
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 2);

    let dir = store.filing_dir(Company::Apple, "0000320193-23-000106");
    let section = fs::read_to_string(dir.join(SECTION_TEXT_FILE)).unwrap();
    assert!(section.starts_with("ITEM 8. Financial Statements and Supplementary Data Net Income: $96,995"));
    assert!(!section.contains("TABLE OF CONTENTS"));
    assert!(!section.contains("ITEM 9"));
    assert!(dir.join(SECTION_META_FILE).is_file());
    assert!(dir.join(SECTION_DEBUG_FILE).is_file());
    assert!(!store
        .filing_dir(Company::Apple, "0000320193-96-000023")
        .join(SECTION_TEXT_FILE)
        .exists());

    let data = assert_ok!(FinancialData::load(&store, SECTION_TEXT_FILE));
    let apple = data.company(Company::Apple).unwrap();
    // 2019 has a section but no parseable figures, so it is left out.
    assert_eq!(apple.years(), &[2021, 2023]);
    assert_eq!(apple.series().net_incomes, vec![-50, 96_995]);
    assert_eq!(apple.series().operating_incomes, vec![1_200, 114_301]);
    assert_eq!(
        apple.figures(2023).and_then(|f| f.summary.as_deref()),
        Some("Services revenue reached a record.")
    );
    assert_eq!(apple.previous_year(2023), Some(2021));
    assert_eq!(apple.previous_year(2021), None);

    assert!(data.company(Company::Microsoft).unwrap().is_empty());
}

#[test]
fn test_load_reads_alternate_figures_file() {
    let tmp = tempdir().unwrap();
    let store = FilingStore::new(tmp.path()).unwrap();

    let dir = store.filing_dir(Company::Microsoft, "0000789019-97-000010");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("insights.txt"),
        "Net Income: $3,454\nOperating Income: $5,130\nSummary: Windows 95 carried the year.",
    )
    .unwrap();

    let data = assert_ok!(FinancialData::load(&store, "insights.txt"));
    let msft = data.company(Company::Microsoft).unwrap();
    assert_eq!(msft.years(), &[1997]);
    assert_eq!(msft.figures(1997).map(|f| f.net_income), Some(3_454));

    let default_file = assert_ok!(FinancialData::load(&store, SECTION_TEXT_FILE));
    assert!(default_file.company(Company::Microsoft).unwrap().is_empty());
}

#[test]
fn test_rerun_drops_section_when_item_8_disappears() {
    let tmp = tempdir().unwrap();
    let store = FilingStore::new(tmp.path()).unwrap();
    let folder = "0000320193-23-000106";

    store.save_full_submission(Company::Apple, folder, FILING_2023).unwrap();
    assert_ok!(pipeline::extract_sections(&store, Company::Apple, &SectionExtractor::new(), false));
    let dir = store.filing_dir(Company::Apple, folder);
    assert!(dir.join(SECTION_TEXT_FILE).is_file());

    // The submission is replaced by one with no usable Item 8.
    store.save_full_submission(Company::Apple, folder, FILING_WITHOUT_KEYWORDS).unwrap();
    let summary = assert_ok!(pipeline::extract_sections(&store, Company::Apple, &SectionExtractor::new(), false));
    assert_eq!(summary.failed, 1);
    assert!(!dir.join(SECTION_TEXT_FILE).exists());
    assert!(!dir.join(SECTION_META_FILE).exists());

    let data = assert_ok!(FinancialData::load(&store, SECTION_TEXT_FILE));
    assert!(data.company(Company::Apple).unwrap().is_empty());
}

#[test]
fn test_load_duplicate_year_keeps_later_folder() {
    let tmp = tempdir().unwrap();
    let store = FilingStore::new(tmp.path()).unwrap();

    for (folder, text) in [
        ("0000320193-23-000001", "Net Income: $1\nOperating Income: $2"),
        ("0000320193-23-000106", "Net Income: $96,995\nOperating Income: $114,301"),
    ] {
        let dir = store.filing_dir(Company::Apple, folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SECTION_TEXT_FILE), text).unwrap();
    }

    let data = assert_ok!(FinancialData::load(&store, SECTION_TEXT_FILE));
    let apple = data.company(Company::Apple).unwrap();
    assert_eq!(apple.years(), &[2023]);
    assert_eq!(apple.figures(2023).map(|f| f.net_income), Some(96_995));
    assert_eq!(apple.series().operating_incomes, vec![114_301]);
}

#[test]
fn test_load_skips_out_of_range_year_folder() {
    let tmp = tempdir().unwrap();
    let store = FilingStore::new(tmp.path()).unwrap();

    for folder in ["0000320193-22-000108", "x-4294967295-1"] {
        let dir = store.filing_dir(Company::Apple, folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SECTION_TEXT_FILE), "Net Income: $99,803\nOperating Income: $119,437").unwrap();
    }
    store.save_full_submission(Company::Apple, "x-4294967295-1", FILING_2021).unwrap();

    let summary = assert_ok!(pipeline::extract_sections(&store, Company::Apple, &SectionExtractor::new(), false));
    assert_eq!(summary.skipped, 2);

    let data = assert_ok!(FinancialData::load(&store, SECTION_TEXT_FILE));
    assert_eq!(data.company(Company::Apple).unwrap().years(), &[2022]);
}
