mod reconciliation_test;
