use std::num::NonZeroUsize;

use bucket_core::nav::{NotFound, resolve};
use bucket_core::paginate::paginate;
use bucket_core::tree::FolderTree;

const MIXED: [&str; 4] = ["a.jpg", "docs/readme.txt", "docs/x.exe", "docs/2023/report.csv"];

#[test]
fn mixed_listing_shapes_the_tree() {
    let tree = FolderTree::build(MIXED);
    let root = tree.root();
    assert_eq!(root.subfolders().map(|f| f.name()).collect::<Vec<_>>(), vec!["docs"]);
    assert_eq!(root.files().len(), 1);

    let docs = resolve(&tree, &["docs"]).unwrap();
    let names: Vec<&str> = docs.files().iter().map(|file| file.name.as_str()).collect();
    assert_eq!(names, vec!["readme.txt"]);

    let year = resolve(&tree, &["docs", "2023"]).unwrap();
    assert_eq!(year.files()[0].name, "report.csv");
}

#[test]
fn missing_folder_is_not_found() {
    let tree = FolderTree::build(MIXED);
    assert_eq!(
        resolve(&tree, &["docs", "missing"]).unwrap_err(),
        NotFound { depth: 1, segment: "missing".to_string() }
    );
}

#[test]
fn doubled_separator_collapses() {
    let tree = FolderTree::build(["a//b.png"]);
    let a = resolve(&tree, &["a"]).unwrap();
    assert_eq!(a.files()[0].name, "b.png");
    assert_eq!(a.subfolder_count(), 0);
    assert_eq!(tree.folder_count(), 2);
}

#[test]
fn twenty_files_in_pages_of_nine() {
    let keys: Vec<String> = (0..20).map(|i| format!("scans/{i}.pdf")).collect();
    let tree = FolderTree::build(&keys);
    let scans = resolve(&tree, &["scans"]).unwrap();

    let page = paginate(scans.files(), 3, NonZeroUsize::new(9).unwrap());
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].full_key, "scans/18.pdf");
}
