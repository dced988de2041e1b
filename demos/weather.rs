//! Play Tennis – Comparing Categorical Classifiers
//! ===============================================
//! Fit a decision tree, naive Bayes and a one-rule model on the classic
//! weather data, print the induced tree and its feature importance, and
//! check how each model does on a held-out split. A k-nearest-neighbour
//! model is fitted on a small numeric data set for comparison.
//!
//! ```bash
//! cargo run --release --example weather
//! ```

use arboretum::data::{read_csv, read_numeric_csv, train_test_split};
use arboretum::metrics::{accuracy, misclassified};
use arboretum::{
    Classifier, DecisionTreeClassifier, FeatureValue, ImportanceMethod, Input, KnnClassifier, ModelIO, NaiveBayesClassifier,
    OneRClassifier, TreeConfig,
};
use std::error::Error;

const FEATURE_NAMES: [&str; 4] = ["outlook", "temperature", "humidity", "wind"];

fn main() -> Result<(), Box<dyn Error>> {
    let (x, y) = read_csv("resources/weather.csv", true)?;
    println!("Loaded {} examples with {} features.", x.len(), FEATURE_NAMES.len());

    // Fit the tree on everything and show what it learned.
    let mut tree = DecisionTreeClassifier::new(TreeConfig::default(), String::from("yes"));
    tree.fit(&x, &y)?;
    if let Some(t) = tree.get_tree() {
        println!("\n{}", t);
    }
    println!("Training accuracy: {:.3}", accuracy(&y, &tree.predict(&x)));

    let mut importance: Vec<(usize, f64)> = tree
        .calculate_feature_importance(ImportanceMethod::TotalGain, true)
        .into_iter()
        .collect();
    importance.sort_by(|a, b| b.1.total_cmp(&a.1));
    println!("\nFeature importance (total gain):");
    for (feature, value) in importance {
        println!("  {:<12} {:.3}", FEATURE_NAMES[feature], value);
    }

    // The model survives a trip through JSON.
    let loaded: DecisionTreeClassifier<FeatureValue, String> = DecisionTreeClassifier::from_json(&tree.json_dump()?)?;
    let row = x[0].clone();
    println!("\nReloaded model predicts {:?} for {:?}", loaded.predict_input(Input::Row(&row)), row);

    // Hold out a third of the rows.
    let split = train_test_split(&x, &y, 0.3, 42)?;
    let mut tree = DecisionTreeClassifier::new(TreeConfig::default(), String::from("yes"));
    let mut bayes = NaiveBayesClassifier::new(String::from("yes"));
    let mut one_r = OneRClassifier::new(String::from("yes"));
    tree.fit(&split.x_train, &split.y_train)?;
    bayes.fit(&split.x_train, &split.y_train)?;
    one_r.fit(&split.x_train, &split.y_train)?;

    println!("\nHeld-out accuracy on {} examples:", split.y_test.len());
    let y_tree = tree.predict_batch(&split.x_test, true);
    println!("  decision tree {:.3}", accuracy(&split.y_test, &y_tree));
    println!("  naive Bayes   {:.3}", accuracy(&split.y_test, &bayes.predict(&split.x_test)));
    println!("  one rule      {:.3}", accuracy(&split.y_test, &one_r.predict(&split.x_test)));
    if let Some(feature) = one_r.get_best_feature_index() {
        println!("  one rule splits on {}", FEATURE_NAMES[feature]);
    }
    println!("  tree errors at rows {:?}", misclassified(&split.y_test, &y_tree));

    // Numeric data for k-nearest neighbours, skipping the id column.
    let (points, classes) = read_numeric_csv("resources/points.csv", true, 1)?;
    let split = train_test_split(&points, &classes, 0.2, 7)?;
    let mut knn = KnnClassifier::new(3, String::from("low"))?;
    knn.fit(&split.x_train, &split.y_train)?;
    println!(
        "\n3-nearest neighbours held-out accuracy: {:.3}",
        accuracy(&split.y_test, &knn.predict(&split.x_test))
    );

    Ok(())
}
