//! XCOPY example: a creator, two collectors, and the stories they tell.
//!
//! Mint → sell → creator story → collector stories → resale → rejected story.
//!
//! Run with: cargo run --example xcopy

use story_ledger::core::collection::StoryCollection;
use story_ledger::schema::interface::InterfaceId;
use story_ledger::schema::token::{Address, TokenId};

fn main() {
    let creator = Address::from_index(1);
    let alice = Address::from_index(2);
    let bob = Address::from_index(3);

    let mut collection = StoryCollection::builder()
        .creator(creator)
        .story_enabled(true)
        .name("Example721")
        .symbol("EX")
        .build()
        .expect("Failed to deploy collection");

    println!("=== {} ({}) ===", collection.name(), collection.symbol());
    println!("story enabled: {}", collection.story_enabled());
    println!(
        "supports {}: {}\n",
        InterfaceId::STORY,
        collection.supports_interface(InterfaceId::STORY)
    );

    // --- Mint and sell ---
    collection.mint(3, creator).expect("mint");
    collection
        .transfer_from(creator, alice, TokenId(2), creator)
        .expect("sell token 2");
    collection
        .transfer_from(creator, bob, TokenId(3), creator)
        .expect("sell token 3");

    // --- Stories ---
    let attempts: Vec<(&str, Result<String, String>)> = vec![
        (
            "creator on #1",
            collection
                .add_creator_story(creator, TokenId(1), "XCOPY", "I AM XCOPY")
                .map(|r| r.story)
                .map_err(|e| e.to_string()),
        ),
        (
            "creator on #4",
            collection
                .add_creator_story(creator, TokenId(4), "XCOPY", "I AM XCOPY")
                .map(|r| r.story)
                .map_err(|e| e.to_string()),
        ),
        (
            "bob on #2",
            collection
                .add_story(bob, TokenId(2), "NOT XCOPY", "I AM NOT XCOPY")
                .map(|r| r.story)
                .map_err(|e| e.to_string()),
        ),
        (
            "alice on #2",
            collection
                .add_story(alice, TokenId(2), "NOT XCOPY", "I AM NOT XCOPY")
                .map(|r| r.story)
                .map_err(|e| e.to_string()),
        ),
    ];
    for (label, outcome) in &attempts {
        match outcome {
            Ok(story) => println!("  {:<14} published: {}", label, story),
            Err(e) => println!("  {:<14} rejected:  {}", label, e),
        }
    }

    // --- Resale: alice sells #2 to bob and loses the right to add stories ---
    collection
        .transfer_from(alice, bob, TokenId(2), alice)
        .expect("resell token 2");
    let after_sale = collection.add_story(alice, TokenId(2), "NOT XCOPY", "still mine?");
    println!("\n  alice after resale: {:?}", after_sale.map(|r| r.story));
    let long = "Lorem Ipsum".repeat(2500);
    let bob_story = collection
        .add_story(bob, TokenId(2), "NOT XCOPY", long)
        .expect("bob owns #2 now");
    println!("  bob after resale: {} characters published", bob_story.story.len());

    // --- Event log ---
    println!("\n=== Event log ===");
    for event in collection.events().iter() {
        println!(
            "  {:<12} token {} by {}",
            event.name(),
            event.token_id(),
            event.author()
        );
    }
}
