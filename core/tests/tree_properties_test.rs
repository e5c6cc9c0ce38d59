use std::collections::HashSet;
use std::num::NonZeroUsize;

use bucket_core::classify::{classify, extension_of};
use bucket_core::nav::resolve;
use bucket_core::paginate::paginate;
use bucket_core::tree::FolderTree;
use proptest::prelude::*;

fn segments(key: &str) -> Vec<&str> {
    key.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn arb_key() -> impl Strategy<Value = String> {
    let folder = prop::sample::select(vec!["a", "b", "c", "a.txt", "2023"]);
    let leaf = prop::sample::select(vec![
        "x.jpg", "y.TXT", "z.exe", "README", "a.txt", "doc.docx", "pic.webp", "b",
    ]);
    let separator = prop::sample::select(vec!["/", "/", "/", "//"]);
    (prop::collection::vec((folder, separator), 0..4), leaf, any::<bool>()).prop_map(
        |(parents, leaf, leading)| {
            let mut key = String::new();
            if leading {
                key.push('/');
            }
            for (name, sep) in parents {
                key.push_str(name);
                key.push_str(sep);
            }
            key.push_str(leaf);
            key
        },
    )
}

fn arb_keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_key(), 0..40).prop_map(|keys| {
        let mut seen = HashSet::new();
        keys.into_iter().filter(|key| seen.insert(key.clone())).collect()
    })
}

proptest! {
    #[test]
    fn every_eligible_key_is_reachable_once(keys in arb_keys()) {
        let tree = FolderTree::build(&keys);
        let mut eligible = 0;

        for key in &keys {
            let parts = segments(key);
            let (leaf, parents) = parts.split_last().expect("generated keys have a leaf");
            let folder = resolve(&tree, parents).expect("parent folders always exist");
            let hits = folder.files().iter().filter(|file| &file.full_key == key).count();

            if classify(leaf).is_eligible() {
                eligible += 1;
                prop_assert_eq!(hits, 1, "key {}", key);
                let entry = folder.files().iter().find(|file| &file.full_key == key).unwrap();
                prop_assert_eq!(&entry.name, leaf);
                prop_assert_eq!(&entry.url, key);
                prop_assert_eq!(&entry.extension, &extension_of(leaf));
            } else {
                prop_assert_eq!(hits, 0, "key {}", key);
            }
        }

        prop_assert_eq!(tree.file_count(), eligible);
    }

    #[test]
    fn folders_match_distinct_prefixes(keys in arb_keys()) {
        let tree = FolderTree::build(&keys);
        let prefixes: HashSet<String> = keys
            .iter()
            .flat_map(|key| {
                let parts = segments(key);
                (1..parts.len()).map(move |len| parts[..len].join("/"))
            })
            .collect();

        // The root is not a prefix.
        prop_assert_eq!(tree.folder_count(), prefixes.len() + 1);
        for folder in tree.folders().skip(1) {
            prop_assert!(prefixes.contains(folder.path()), "unexpected folder {}", folder.path());
        }
    }

    #[test]
    fn building_is_deterministic(keys in arb_keys()) {
        prop_assert_eq!(FolderTree::build(&keys), FolderTree::build(&keys));
    }

    #[test]
    fn subfolder_names_are_unique(keys in arb_keys()) {
        let tree = FolderTree::build(&keys);
        for folder in tree.folders() {
            let mut names = HashSet::new();
            for child in folder.subfolders() {
                prop_assert!(names.insert(child.name()), "duplicate {}", child.name());
                let expected = if folder.is_root() {
                    child.name().to_string()
                } else {
                    format!("{}/{}", folder.path(), child.name())
                };
                prop_assert_eq!(child.path(), expected.as_str());
            }
        }
    }

    #[test]
    fn pages_partition_the_list(len in 0usize..200, size in 1usize..25) {
        let items: Vec<usize> = (0..len).collect();
        let size = NonZeroUsize::new(size).unwrap();
        let total = paginate(&items, 1, size).total_pages;
        prop_assert_eq!(total, len.div_ceil(size.get()));

        let mut joined = Vec::with_capacity(len);
        for page in 1..=total {
            let slice = paginate(&items, page, size).items;
            prop_assert!(!slice.is_empty());
            prop_assert!(slice.len() <= size.get());
            if page < total {
                prop_assert_eq!(slice.len(), size.get());
            }
            joined.extend_from_slice(slice);
        }
        prop_assert_eq!(&joined, &items);
        prop_assert!(paginate(&items, total + 1, size).items.is_empty());
    }
}
